//! Key/value context attached to a record.

use serde_json::Value;
use std::fmt;

/// One structured key/value pair.
///
/// Values go through `serde_json::Value` so numbers, booleans, and nested data keep
/// their type in the encoded line instead of being stringified.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Any `Display` value rendered as a JSON string.
    #[must_use]
    pub fn display(key: impl Into<String>, value: impl fmt::Display) -> Self {
        Self {
            key: key.into(),
            value: Value::String(value.to_string()),
        }
    }

    /// Parses `key=value` as given on a command line. The value becomes a JSON number
    /// or boolean when it parses as one, otherwise a string.
    #[must_use]
    pub fn parse_pair(pair: &str) -> Option<Self> {
        let (key, raw) = pair.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        let value = match serde_json::from_str::<Value>(raw) {
            Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
            _ => Value::String(raw.to_string()),
        };
        Some(Self {
            key: key.to_string(),
            value,
        })
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Field {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
