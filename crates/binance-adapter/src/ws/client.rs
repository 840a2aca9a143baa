/*
[INPUT]:  Stream configuration, topic names, and caller handlers
[OUTPUT]: Live market-data subscriptions with bounded auto-reconnect
[POS]:    WebSocket layer - subscription sessions and reconnect logic
[UPDATE]: When adding subscription kinds or changing reconnect behavior
*/

use crate::http::Result;
use crate::ws::connector::{StreamConnection, StreamConnector, WsConnector};
use crate::ws::message::{DepthEvent, KlineEvent};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::{Notify, Semaphore, watch};
use tracing::{debug, info, warn};

/// Base URL for the Binance market-data stream endpoint
const DEFAULT_STREAM_URL: &str = "wss://stream.binance.com:9443/ws";

const DEFAULT_RECONNECT_LIMIT: u32 = 10;
const DEFAULT_MAX_IN_FLIGHT: usize = 64;

/// Stream configuration, immutable after construction
#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub base_url: String,
    pub auto_reconnect: bool,
    /// Reconnect budget for one subscription; monotonic, never refilled
    pub reconnect_limit: u32,
    /// Bound on concurrently running handler invocations
    pub max_in_flight: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STREAM_URL.to_string(),
            auto_reconnect: true,
            reconnect_limit: DEFAULT_RECONNECT_LIMIT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

/// Handler invoked once per inbound stream message.
///
/// Invocations are dispatched on their own tasks and may run concurrently
/// with each other and with subsequent reads; handlers must synchronize
/// any shared state themselves.
pub type StreamHandler = Arc<dyn Fn(Vec<u8>) + Send + Sync>;

/// Lifecycle of one stream session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Open,
    Reconnecting,
    Closed,
}

/// Market-data stream subscriber
#[derive(Debug)]
pub struct MarketStream<C: StreamConnector = WsConnector> {
    config: StreamConfig,
    connector: Arc<C>,
}

impl MarketStream<WsConnector> {
    /// Create a subscriber with default configuration
    pub fn new() -> Self {
        Self::with_config(StreamConfig::default())
    }

    /// Create a subscriber with custom configuration
    pub fn with_config(config: StreamConfig) -> Self {
        Self {
            config,
            connector: Arc::new(WsConnector),
        }
    }
}

impl Default for MarketStream<WsConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: StreamConnector> MarketStream<C> {
    /// Create a subscriber over a custom transport
    pub fn with_connector(config: StreamConfig, connector: C) -> Self {
        Self {
            config,
            connector: Arc::new(connector),
        }
    }

    /// Subscribe to a raw topic, delivering every inbound message to
    /// `handler`.
    ///
    /// A failed initial handshake is returned as an error. On success a
    /// background task runs the read/dispatch loop until the handle is
    /// closed, the reconnect budget is exhausted, or auto-reconnect is
    /// disabled and a read fails.
    pub async fn subscribe(&self, topic: &str, handler: StreamHandler) -> Result<StreamHandle> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), topic);
        let conn = self.connector.connect(&url).await?;
        info!(topic, url = %url, "stream connected");

        let (state_tx, state_rx) = watch::channel(StreamState::Open);
        let shutdown = Arc::new(Notify::new());
        let session = Session {
            url,
            topic: topic.to_string(),
            connector: Arc::clone(&self.connector),
            auto_reconnect: self.config.auto_reconnect,
            reconnect_limit: self.config.reconnect_limit,
            dispatch_slots: Arc::new(Semaphore::new(self.config.max_in_flight)),
            state_tx,
            shutdown: Arc::clone(&shutdown),
        };
        tokio::spawn(session.run(conn, handler));

        Ok(StreamHandle { state_rx, shutdown })
    }

    /// Subscribe to order-book depth updates for a symbol
    pub async fn depth<F>(&self, symbol: &str, handler: F) -> Result<StreamHandle>
    where
        F: Fn(DepthEvent) + Send + Sync + 'static,
    {
        let topic = depth_topic(symbol);
        let decoder = decode_handler(topic.clone(), handler);
        self.subscribe(&topic, decoder).await
    }

    /// Subscribe to candlestick updates for a symbol and interval
    pub async fn kline<F>(&self, symbol: &str, interval: &str, handler: F) -> Result<StreamHandle>
    where
        F: Fn(KlineEvent) + Send + Sync + 'static,
    {
        let topic = kline_topic(symbol, interval);
        let decoder = decode_handler(topic.clone(), handler);
        self.subscribe(&topic, decoder).await
    }
}

/// Topic name for depth-of-book updates
pub fn depth_topic(symbol: &str) -> String {
    format!("{}@depth", symbol.to_lowercase())
}

/// Topic name for candlestick updates
pub fn kline_topic(symbol: &str, interval: &str) -> String {
    format!("{}@kline_{}", symbol.to_lowercase(), interval)
}

/// Wrap a typed handler so each raw message is deserialized first.
///
/// Undecodable payloads are logged and dropped; delivery continues.
fn decode_handler<T, F>(topic: String, handler: F) -> StreamHandler
where
    T: DeserializeOwned + 'static,
    F: Fn(T) + Send + Sync + 'static,
{
    Arc::new(move |raw: Vec<u8>| match serde_json::from_slice::<T>(&raw) {
        Ok(event) => handler(event),
        Err(error) => warn!(topic = %topic, %error, "dropping undecodable stream message"),
    })
}

/// Handle to one live subscription
#[derive(Debug)]
pub struct StreamHandle {
    state_rx: watch::Receiver<StreamState>,
    shutdown: Arc<Notify>,
}

impl StreamHandle {
    /// Request deterministic teardown of the subscription
    pub fn close(&self) {
        self.shutdown.notify_one();
    }

    /// Current session state
    pub fn state(&self) -> StreamState {
        *self.state_rx.borrow()
    }

    /// Whether the session has reached its terminal state
    pub fn is_closed(&self) -> bool {
        self.state() == StreamState::Closed
    }

    /// Wait until the session reaches its terminal state
    pub async fn closed(&mut self) {
        while *self.state_rx.borrow_and_update() != StreamState::Closed {
            if self.state_rx.changed().await.is_err() {
                break;
            }
        }
    }
}

/// State owned by one subscription's background task
struct Session<C: StreamConnector> {
    url: String,
    topic: String,
    connector: Arc<C>,
    auto_reconnect: bool,
    reconnect_limit: u32,
    dispatch_slots: Arc<Semaphore>,
    state_tx: watch::Sender<StreamState>,
    shutdown: Arc<Notify>,
}

impl<C: StreamConnector> Session<C> {
    async fn run(self, mut conn: C::Conn, handler: StreamHandler) {
        // monotonic for the session lifetime, never reset on success
        let mut reconnects: u32 = 0;
        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    conn.close().await;
                    break;
                }
                message = conn.next_message() => {
                    match message {
                        Some(Ok(payload)) => {
                            // keep shutdown responsive while waiting for a
                            // dispatch slot under handler saturation
                            let permit = tokio::select! {
                                _ = self.shutdown.notified() => {
                                    conn.close().await;
                                    break;
                                }
                                permit = Arc::clone(&self.dispatch_slots).acquire_owned() => {
                                    let Ok(permit) = permit else { break };
                                    permit
                                }
                            };
                            let handler = Arc::clone(&handler);
                            tokio::spawn(async move {
                                handler(payload);
                                drop(permit);
                            });
                        }
                        Some(Err(error)) => {
                            warn!(topic = %self.topic, %error, "stream read failed");
                            if !self.reconnect(&mut conn, &mut reconnects).await {
                                break;
                            }
                        }
                        None => {
                            warn!(topic = %self.topic, "stream closed by remote");
                            if !self.reconnect(&mut conn, &mut reconnects).await {
                                break;
                            }
                        }
                    }
                }
            }
        }
        self.state_tx.send_replace(StreamState::Closed);
        debug!(topic = %self.topic, reconnects, "stream session closed");
    }

    /// Replace the connection wholesale while budget remains.
    ///
    /// A failed re-dial consumes budget the same way a read failure does.
    /// Returns false once the session must stop.
    async fn reconnect(&self, conn: &mut C::Conn, reconnects: &mut u32) -> bool {
        conn.close().await;
        while self.auto_reconnect && *reconnects < self.reconnect_limit {
            *reconnects += 1;
            self.state_tx.send_replace(StreamState::Reconnecting);
            match self.connector.connect(&self.url).await {
                Ok(new_conn) => {
                    *conn = new_conn;
                    self.state_tx.send_replace(StreamState::Open);
                    info!(topic = %self.topic, attempt = *reconnects, "stream reconnected");
                    return true;
                }
                Err(error) => {
                    warn!(topic = %self.topic, attempt = *reconnects, %error, "reconnect dial failed");
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stream_config() {
        let config = StreamConfig::default();
        assert_eq!(config.base_url, DEFAULT_STREAM_URL);
        assert!(config.auto_reconnect);
        assert_eq!(config.reconnect_limit, 10);
    }

    #[test]
    fn test_topic_names() {
        assert_eq!(depth_topic("BTCUSDT"), "btcusdt@depth");
        assert_eq!(kline_topic("BTCUSDT", "1m"), "btcusdt@kline_1m");
    }
}
