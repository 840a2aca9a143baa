/*
[INPUT]:  Symbol and kline interval
[OUTPUT]: Real-time depth and candlestick events printed to stdout
[POS]:    Examples - stream subscriptions with auto-reconnect
[UPDATE]: When subscription API changes
*/

use binance_adapter::*;
use tokio::time::{Duration, sleep};

/// Example: live market-data subscriptions
#[tokio::main]
async fn main() {
    println!("=== Binance Stream Example ===\n");

    let stream = MarketStream::new();

    let depth_handle = match stream
        .depth("BTCUSDT", |event| {
            println!(
                "depth {} bids={} asks={}",
                event.symbol,
                event.bids.len(),
                event.asks.len()
            );
        })
        .await
    {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("depth subscription failed: {}", e);
            return;
        }
    };
    println!("✓ depth subscription open");

    let kline_handle = match stream
        .kline("BTCUSDT", "1m", |event| {
            println!(
                "kline {} {} close={}",
                event.symbol, event.kline.interval, event.kline.close
            );
        })
        .await
    {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("kline subscription failed: {}", e);
            return;
        }
    };
    println!("✓ kline subscription open\n");

    sleep(Duration::from_secs(10)).await;

    // deterministic teardown through the handles
    depth_handle.close();
    kline_handle.close();
    println!("\n✓ Stream example complete");
}
