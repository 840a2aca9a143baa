/*
[INPUT]:  HTTP client configuration and request parameters
[OUTPUT]: HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding request features or changing client behavior
*/

pub mod client;
pub mod error;
pub mod query;
pub mod signature;

pub use error::{BinanceError, Result};
pub use signature::sign_query;

pub use client::{BinanceClient, ClientConfig, RequestObserver};
