/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Binance adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod ws;

// Re-export commonly used types from http
pub use http::{
    BinanceClient,
    BinanceError,
    ClientConfig,
    RequestObserver,
    Result,
};

// Re-export commonly used types from ws
pub use ws::{
    DepthEvent,
    KlineEvent,
    MarketStream,
    StreamConfig,
    StreamHandle,
    StreamHandler,
    StreamState,
};
