//! Schema-free JSON normalization
//!
//! The analysis feed nests objects whose key sets vary per document, with
//! values that may be strings, numbers, booleans, lists or further objects.
//! `FlexibleValue` is the tagged union those values normalize into, and the
//! decode routines here turn raw `serde_json` nodes into it without a
//! predeclared schema.

use crate::error::{AppError, Result};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A JSON value normalized into a fixed set of variants.
///
/// Variant order is the decode priority: string, integer, float, boolean,
/// list, map. A number with no fractional part always becomes `Int`, never
/// `Float`. JSON `null` matches no variant and fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlexibleValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<FlexibleValue>),
    Map(IndexMap<String, FlexibleValue>),
}

impl FlexibleValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlexibleValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view; integers widen to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FlexibleValue::Float(f) => Some(*f),
            FlexibleValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FlexibleValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlexibleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for FlexibleValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decode_flexible(&value, "$").map_err(D::Error::custom)
    }
}

/// Decode a raw JSON node into a [`FlexibleValue`].
///
/// Tries each variant in the fixed priority order and commits to the first
/// match. `path` is carried into the error for diagnostics; `null` is the
/// only well-formed node with no matching variant.
pub fn decode_flexible(value: &Value, path: &str) -> Result<FlexibleValue> {
    match value {
        Value::String(s) => Ok(FlexibleValue::Str(s.clone())),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(FlexibleValue::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(FlexibleValue::Float(f))
            } else {
                Err(AppError::decode(path, format!("unrepresentable number {}", n)))
            }
        }
        Value::Bool(b) => Ok(FlexibleValue::Bool(*b)),
        Value::Array(items) => {
            let mut list = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                list.push(decode_flexible(item, &format!("{}[{}]", path, i))?);
            }
            Ok(FlexibleValue::List(list))
        }
        Value::Object(fields) => {
            let mut map = IndexMap::with_capacity(fields.len());
            for (key, field) in fields {
                map.insert(
                    key.clone(),
                    decode_flexible(field, &format!("{}.{}", path, key))?,
                );
            }
            Ok(FlexibleValue::Map(map))
        }
        Value::Null => Err(AppError::decode(path, "null matches no variant")),
    }
}

/// Decode a JSON object whose key set is not known ahead of time.
///
/// Every key present on the object is decoded with [`decode_flexible`]; a
/// key whose value fails to decode is dropped with a warning so the rest of
/// the document stays usable. A non-object input is a decode error.
pub fn decode_open_map(value: &Value, path: &str) -> Result<IndexMap<String, FlexibleValue>> {
    let fields = value
        .as_object()
        .ok_or_else(|| AppError::decode(path, "expected an object"))?;

    let mut map = IndexMap::with_capacity(fields.len());
    for (key, field) in fields {
        match decode_flexible(field, &format!("{}.{}", path, key)) {
            Ok(v) => {
                map.insert(key.clone(), v);
            }
            Err(e) => {
                tracing::warn!("Dropping malformed key '{}' at {}: {}", key, path, e);
            }
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whole_number_decodes_as_int() {
        let v = decode_flexible(&json!(42), "$").unwrap();
        assert_eq!(v, FlexibleValue::Int(42));
    }

    #[test]
    fn test_fractional_number_decodes_as_float() {
        let v = decode_flexible(&json!(4.25), "$").unwrap();
        assert_eq!(v, FlexibleValue::Float(4.25));
    }

    #[test]
    fn test_string_of_digits_stays_a_string() {
        let v = decode_flexible(&json!("42"), "$").unwrap();
        assert_eq!(v, FlexibleValue::Str("42".to_string()));
    }

    #[test]
    fn test_array_of_strings_decodes_as_list() {
        let v = decode_flexible(&json!(["a", "b"]), "$").unwrap();
        assert_eq!(
            v,
            FlexibleValue::List(vec![
                FlexibleValue::Str("a".to_string()),
                FlexibleValue::Str("b".to_string()),
            ])
        );
    }

    #[test]
    fn test_null_fails_with_path() {
        let err = decode_flexible(&json!(null), "$.revenue").unwrap_err();
        assert!(err.to_string().contains("$.revenue"));
    }

    #[test]
    fn test_open_map_drops_null_keys() {
        let raw = json!({"revenue": "5.1B", "growth": null, "margin": 0.42});
        let map = decode_open_map(&raw, "$").unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("revenue"));
        assert!(map.contains_key("margin"));
        assert!(!map.contains_key("growth"));
    }

    #[test]
    fn test_open_map_rejects_non_object() {
        assert!(decode_open_map(&json!([1, 2]), "$").is_err());
    }

    #[test]
    fn test_open_map_round_trip_preserves_keys_and_order() {
        let raw = json!({
            "zeta": "first in wire order",
            "alpha": 3,
            "nested": {"x": true, "y": [1, 2.5]}
        });
        let map = decode_open_map(&raw, "$").unwrap();
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "nested"]);

        let encoded = serde_json::to_value(&map).unwrap();
        assert_eq!(encoded, raw);
    }

    #[test]
    fn test_flexible_value_deserialize_matches_decode() {
        let v: FlexibleValue = serde_json::from_str("7").unwrap();
        assert_eq!(v, FlexibleValue::Int(7));
        let v: FlexibleValue = serde_json::from_str("7.5").unwrap();
        assert_eq!(v, FlexibleValue::Float(7.5));
        assert!(serde_json::from_str::<FlexibleValue>("null").is_err());
    }
}
