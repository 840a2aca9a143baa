/*
[INPUT]:  HTTP configuration (base URL, credentials, timeouts)
[OUTPUT]: Plain and signed unary exchanges against the REST API
[POS]:    HTTP layer - core request dispatcher
[UPDATE]: When adding connection options or changing dispatch behavior
*/

use crate::http::query::{encode_query, flatten_params};
use crate::http::signature::sign_query;
use crate::http::{BinanceError, Result};
use chrono::Utc;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Base URL for the Binance REST API
const DEFAULT_BASE_URL: &str = "https://api.binance.com";

const API_KEY_HEADER: &str = "X-MBX-APIKEY";
const USER_AGENT_HEADER: &str = "UserAgent";

/// HTTP client configuration, immutable after construction
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub secret_key: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            secret_key: String::new(),
            user_agent: concat!("binance-adapter/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Callback invoked with method and fully resolved URL before every send
pub type RequestObserver = Arc<dyn Fn(&Method, &Url) + Send + Sync>;

/// Main HTTP client for the Binance REST API
pub struct BinanceClient {
    http_client: Client,
    base_url: Url,
    api_key: String,
    secret_key: String,
    user_agent: String,
    observer: Option<RequestObserver>,
}

impl fmt::Debug for BinanceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinanceClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl BinanceClient {
    /// Create a new client with default configuration and the given keys
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
            ..ClientConfig::default()
        })
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(&config.base_url)?,
            api_key: config.api_key,
            secret_key: config.secret_key,
            user_agent: config.user_agent,
            observer: None,
        })
    }

    /// Install an observer called with method and URL before each send
    pub fn with_request_observer(mut self, observer: RequestObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Perform a plain (unsigned) request.
    ///
    /// Parameters are flattened into the query string for every method;
    /// Binance accepts query parameters on writes as well as reads.
    pub async fn request<P: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: &P,
    ) -> Result<T> {
        let flat = flatten_params(params)?;
        let query = encode_query(&flat);
        let url = self.resolve_url(endpoint, &query)?;
        self.dispatch(method, url).await
    }

    /// Perform a signed request.
    ///
    /// Flattens `params`, adds a `timestamp` parameter (ms since epoch,
    /// captured at call time), then appends a trailing `signature`
    /// parameter: hex HMAC-SHA256 over exactly the encoded query that
    /// precedes it. The signature is recomputed fresh on every call.
    pub async fn signed_request<P: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        params: &P,
    ) -> Result<T> {
        let mut flat = flatten_params(params)?;
        flat.insert(
            "timestamp".to_string(),
            Utc::now().timestamp_millis().to_string(),
        );
        let encoded = encode_query(&flat);
        let signature = sign_query(&self.secret_key, &encoded);
        // signature must stay the last parameter on the wire
        let query = format!("{encoded}&signature={signature}");
        let url = self.resolve_url(endpoint, &query)?;
        self.dispatch(method, url).await
    }

    /// Append `endpoint` verbatim to the configured base path
    fn resolve_url(&self, endpoint: &str, query: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        let base_path = self.base_url.path();
        if base_path == "/" {
            url.set_path(endpoint);
        } else {
            url.set_path(&format!("{base_path}{endpoint}"));
        }
        url.set_query(if query.is_empty() { None } else { Some(query) });
        Ok(url)
    }

    async fn dispatch<T: DeserializeOwned>(&self, method: Method, url: Url) -> Result<T> {
        debug!(%method, %url, "dispatching request");
        if let Some(observer) = &self.observer {
            observer(&method, &url);
        }

        let response = self
            .http_client
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .header(USER_AGENT_HEADER, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            let payload: ApiErrorPayload = serde_json::from_str(&body)?;
            return Err(BinanceError::Api {
                code: payload.code,
                message: payload.msg,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Error payload the exchange returns on any non-200 status
#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    code: i64,
    msg: String,
}
