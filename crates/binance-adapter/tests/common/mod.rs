/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for binance-adapter tests

use binance_adapter::{BinanceClient, ClientConfig};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_SECRET_KEY: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Build a client pointed at the mock server
pub fn client_for(server: &MockServer) -> BinanceClient {
    BinanceClient::with_config(ClientConfig {
        base_url: server.uri(),
        api_key: TEST_API_KEY.to_string(),
        secret_key: TEST_SECRET_KEY.to_string(),
        ..ClientConfig::default()
    })
    .expect("client init")
}
