/*
[INPUT]:  Raw stream message bytes
[OUTPUT]: Typed depth and kline events
[POS]:    WebSocket layer - payload decoding for derived subscriptions
[UPDATE]: When adding stream payload types or changing field mappings
*/

use serde::{Deserialize, Serialize};

/// One price level as the exchange sends it: [price, quantity]
pub type PriceLevel = (String, String);

/// Order-book depth update (`<symbol>@depth`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DepthEvent {
    #[serde(rename = "e")]
    pub event_type: String,
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "U")]
    pub first_update_id: u64,
    #[serde(rename = "u")]
    pub final_update_id: u64,
    #[serde(rename = "b")]
    pub bids: Vec<PriceLevel>,
    #[serde(rename = "a")]
    pub asks: Vec<PriceLevel>,
}

/// Candlestick update (`<symbol>@kline_<interval>`)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct KlineEvent {
    #[serde(rename = "e")]
    pub event_type: String,
    #[serde(rename = "E")]
    pub event_time: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "k")]
    pub kline: Kline,
}

/// The candle carried inside a kline event
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Kline {
    #[serde(rename = "t")]
    pub open_time: u64,
    #[serde(rename = "T")]
    pub close_time: u64,
    #[serde(rename = "s")]
    pub symbol: String,
    #[serde(rename = "i")]
    pub interval: String,
    #[serde(rename = "o")]
    pub open: String,
    #[serde(rename = "c")]
    pub close: String,
    #[serde(rename = "h")]
    pub high: String,
    #[serde(rename = "l")]
    pub low: String,
    #[serde(rename = "v")]
    pub volume: String,
    #[serde(rename = "n")]
    pub trade_count: u64,
    #[serde(rename = "x")]
    pub is_closed: bool,
    #[serde(rename = "q")]
    pub quote_volume: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_event_decodes() {
        let raw = r#"{
            "e": "depthUpdate",
            "E": 123456789,
            "s": "BNBBTC",
            "U": 157,
            "u": 160,
            "b": [["0.0024", "10"]],
            "a": [["0.0026", "100"]]
        }"#;
        let event: DepthEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.event_type, "depthUpdate");
        assert_eq!(event.symbol, "BNBBTC");
        assert_eq!(event.first_update_id, 157);
        assert_eq!(event.final_update_id, 160);
        assert_eq!(event.bids, vec![("0.0024".to_string(), "10".to_string())]);
        assert_eq!(event.asks, vec![("0.0026".to_string(), "100".to_string())]);
    }

    #[test]
    fn test_kline_event_decodes() {
        let raw = r#"{
            "e": "kline",
            "E": 123456789,
            "s": "BTCUSDT",
            "k": {
                "t": 123400000,
                "T": 123460000,
                "s": "BTCUSDT",
                "i": "1m",
                "o": "0.0010",
                "c": "0.0020",
                "h": "0.0025",
                "l": "0.0015",
                "v": "1000",
                "n": 100,
                "x": false,
                "q": "1.0000"
            }
        }"#;
        let event: KlineEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.kline.interval, "1m");
        assert_eq!(event.kline.close, "0.0020");
        assert!(!event.kline.is_closed);
    }
}
