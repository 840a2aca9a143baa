/*
[INPUT]:  Stream configuration and subscription topics
[OUTPUT]: Real-time market data delivered to caller handlers
[POS]:    WebSocket layer - real-time data streams
[UPDATE]: When adding subscription kinds or changing connection logic
*/

pub mod client;
pub mod connector;
pub mod message;

pub use client::{
    MarketStream, StreamConfig, StreamHandle, StreamHandler, StreamState, depth_topic, kline_topic,
};
pub use connector::{StreamConnection, StreamConnector, WsConnector};
pub use message::{DepthEvent, Kline, KlineEvent, PriceLevel};
