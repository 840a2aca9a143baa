/*
[INPUT]:  Arbitrary serializable parameter bags
[OUTPUT]: Flat, sorted, percent-encoded query strings
[POS]:    HTTP layer - parameter flattening for plain and signed requests
[UPDATE]: When changing value stringification or encoding rules
*/

use crate::http::{BinanceError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use url::form_urlencoded;

/// Flatten a serializable parameter bag into a sorted key -> value map.
///
/// `()` and `Option::None` bags serialize to JSON null and yield an empty
/// map. Scalar values keep their natural textual form (no JSON quoting for
/// strings); null fields are skipped; nested values fall back to compact
/// JSON text. Anything that does not serialize to an object is rejected.
pub fn flatten_params<P: Serialize>(params: &P) -> Result<BTreeMap<String, String>> {
    let value = serde_json::to_value(params)?;
    let mut flat = BTreeMap::new();
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, value) in map {
                if value.is_null() {
                    continue;
                }
                flat.insert(key, stringify(&value));
            }
        }
        other => {
            return Err(BinanceError::InvalidParams(format!(
                "expected a key/value parameter bag, got {other}"
            )));
        }
    }
    Ok(flat)
}

/// Percent-encode a flattened bag into a query string, in key order.
///
/// Sorted ordering matters for signed requests: the signature is verified
/// server-side over exactly this encoding.
pub fn encode_query(params: &BTreeMap<String, String>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct OrderParams {
        symbol: String,
        quantity: f64,
        #[serde(rename = "recvWindow")]
        recv_window: Option<u64>,
        test: bool,
    }

    #[test]
    fn test_flatten_scalars_keep_natural_form() {
        let params = OrderParams {
            symbol: "BTCUSDT".to_string(),
            quantity: 0.5,
            recv_window: Some(5000),
            test: true,
        };
        let flat = flatten_params(&params).unwrap();
        assert_eq!(flat.get("symbol").map(String::as_str), Some("BTCUSDT"));
        assert_eq!(flat.get("quantity").map(String::as_str), Some("0.5"));
        assert_eq!(flat.get("recvWindow").map(String::as_str), Some("5000"));
        assert_eq!(flat.get("test").map(String::as_str), Some("true"));
        assert_eq!(flat.len(), 4);
    }

    #[test]
    fn test_flatten_skips_null_fields() {
        let params = OrderParams {
            symbol: "ETHUSDT".to_string(),
            quantity: 1.0,
            recv_window: None,
            test: false,
        };
        let flat = flatten_params(&params).unwrap();
        assert!(!flat.contains_key("recvWindow"));
    }

    #[test]
    fn test_flatten_unit_is_empty() {
        let flat = flatten_params(&()).unwrap();
        assert!(flat.is_empty());
    }

    #[test]
    fn test_flatten_rejects_non_object() {
        let err = flatten_params(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, BinanceError::InvalidParams(_)));
    }

    #[test]
    fn test_encode_is_sorted_and_escaped() {
        let mut flat = BTreeMap::new();
        flat.insert("symbol".to_string(), "BTCUSDT".to_string());
        flat.insert("note".to_string(), "a b&c".to_string());
        assert_eq!(encode_query(&flat), "note=a+b%26c&symbol=BTCUSDT");
    }
}
