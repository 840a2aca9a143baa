/*
[INPUT]:  Symbol identifier (e.g., "BTCUSDT")
[OUTPUT]: Market data fetched through the generic dispatcher
[POS]:    Examples - plain and signed REST requests
[UPDATE]: When dispatcher usage changes
*/

use binance_adapter::*;
use reqwest::Method;
use serde::Serialize;

#[derive(Serialize)]
struct DepthParams {
    symbol: String,
    limit: u32,
}

/// Example: unary REST calls through the request dispatcher
///
/// Public endpoints work without keys; signed endpoints need real
/// API credentials in the config.
#[tokio::main]
async fn main() {
    println!("=== Binance Market Data Example ===\n");

    let client = match BinanceClient::new("", "") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created\n");

    // Public depth snapshot
    let params = DepthParams {
        symbol: "BTCUSDT".to_string(),
        limit: 5,
    };
    println!("Querying depth for BTCUSDT...");
    match client
        .request::<_, serde_json::Value>(Method::GET, "/api/v3/depth", &params)
        .await
    {
        Ok(depth) => println!("✓ Depth: {}", depth),
        Err(e) => println!("✗ Error: {}", e),
    }

    // Signed account call (fails without real keys, shown for shape)
    println!("\nQuerying account (signed)...");
    match client
        .signed_request::<_, serde_json::Value>(Method::GET, "/api/v3/account", &())
        .await
    {
        Ok(account) => println!("✓ Account: {}", account),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
