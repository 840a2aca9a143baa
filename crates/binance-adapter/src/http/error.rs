/*
[INPUT]:  Error sources (HTTP, API, serialization, WebSocket)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the Binance adapter
#[derive(Error, Debug)]
pub enum BinanceError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-200 status with an error payload
    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Request parameters could not be flattened into a query string
    #[error("Invalid request parameters: {0}")]
    InvalidParams(String),

    /// WebSocket dial or frame error
    #[error("WebSocket error: {0}")]
    WebSocket(String),
}

impl BinanceError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, BinanceError::Http(_) | BinanceError::WebSocket(_))
    }

    /// Message text of an API error, if this is one
    pub fn api_message(&self) -> Option<&str> {
        match self {
            BinanceError::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, BinanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let ws_err = BinanceError::WebSocket("dial refused".to_string());
        assert!(ws_err.is_retryable());

        let api_err = BinanceError::Api {
            code: -1100,
            message: "Illegal characters".to_string(),
        };
        assert!(!api_err.is_retryable());
    }

    #[test]
    fn test_api_message() {
        let err = BinanceError::Api {
            code: -2014,
            message: "API-key format invalid".to_string(),
        };
        assert_eq!(err.api_message(), Some("API-key format invalid"));
        assert!(BinanceError::InvalidParams("x".into()).api_message().is_none());
    }
}
