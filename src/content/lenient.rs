//! Field decoders for loosely typed documents.
//!
//! The admin forms have stored numbers as strings and left fields null, so
//! content decoding accepts those shapes instead of rejecting the record.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Text field. Null is empty; numbers and booleans are written out.
///
pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!("expected text, found {}", other))),
    }
}

/// Any field where null means the type's default.
///
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ordering key stored as an integer, a float or a numeric string. Anything
/// else counts as no order.
///
pub fn sort_order<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.round() as i64))
        }
        _ => None,
    })
}

/// Page rank; missing or unreadable ranks are zero.
///
pub fn rank<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(sort_order(deserializer)?.unwrap_or_default())
}
