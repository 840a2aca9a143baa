/*
[INPUT]:  Stream endpoint URLs
[OUTPUT]: Duplex connections yielding discrete inbound messages
[POS]:    WebSocket layer - transport seam over tokio-tungstenite
[UPDATE]: When changing transport behavior or frame handling
*/

use crate::http::{BinanceError, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// One live duplex connection delivering discrete inbound messages
#[async_trait]
pub trait StreamConnection: Send + 'static {
    /// Next inbound payload; `None` once the remote has closed
    async fn next_message(&mut self) -> Option<Result<Vec<u8>>>;

    /// Close the connection; errors during teardown are ignored
    async fn close(&mut self);
}

/// Dials a URL to obtain a stream connection
#[async_trait]
pub trait StreamConnector: Send + Sync + 'static {
    type Conn: StreamConnection;

    async fn connect(&self, url: &str) -> Result<Self::Conn>;
}

/// Production connector backed by tokio-tungstenite
#[derive(Debug, Clone, Default)]
pub struct WsConnector;

/// Production connection wrapping one WebSocket stream
pub struct WsConnection {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl StreamConnector for WsConnector {
    type Conn = WsConnection;

    async fn connect(&self, url: &str) -> Result<WsConnection> {
        let (ws_stream, _response) = connect_async(url)
            .await
            .map_err(|e| BinanceError::WebSocket(e.to_string()))?;
        Ok(WsConnection { inner: ws_stream })
    }
}

#[async_trait]
impl StreamConnection for WsConnection {
    async fn next_message(&mut self) -> Option<Result<Vec<u8>>> {
        loop {
            match self.inner.next().await? {
                Ok(WsMessage::Text(text)) => return Some(Ok(text.as_bytes().to_vec())),
                Ok(WsMessage::Binary(bytes)) => return Some(Ok(bytes.to_vec())),
                Ok(WsMessage::Ping(_)) | Ok(WsMessage::Pong(_)) | Ok(WsMessage::Frame(_)) => {}
                Ok(WsMessage::Close(_)) => return None,
                Err(e) => return Some(Err(BinanceError::WebSocket(e.to_string()))),
            }
        }
    }

    async fn close(&mut self) {
        let _ = self.inner.close(None).await;
    }
}
