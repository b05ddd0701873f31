//! Adaptation between JSON values and bencode values.
//!
//! JSON is the host value model for callers that hold loosely typed data.
//! Mapping rules:
//!
//! - numbers become integers; fractional numbers round half away from zero
//! - strings become byte strings holding their UTF-8 bytes
//! - arrays become lists, objects become dictionaries
//! - `null` and booleans have no bencode form and are rejected

use std::borrow::Cow;

use serde_json::{Map, Number};

use crate::codec::encode;
use crate::error::EncodeError;
use crate::model::{Dictionary, Integer, Value};

/// Converts a JSON value into a bencode value.
pub fn from_json(json: &serde_json::Value) -> Result<Value<'static>, EncodeError> {
    match json {
        serde_json::Value::Null => Err(EncodeError::TypeError { found: "null" }),
        serde_json::Value::Bool(_) => Err(EncodeError::TypeError { found: "boolean" }),
        serde_json::Value::Number(n) => number_to_integer(n).map(Value::Integer),
        serde_json::Value::String(s) => Ok(Value::Bytes(Cow::Owned(s.as_bytes().to_vec()))),
        serde_json::Value::Array(items) => items
            .iter()
            .map(from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        serde_json::Value::Object(map) => {
            let mut dict = Dictionary::with_capacity(map.len());
            for (key, value) in map {
                dict.insert(key.as_bytes().to_vec(), from_json(value)?);
            }
            Ok(Value::Dict(dict))
        }
    }
}

fn number_to_integer(n: &Number) -> Result<Integer, EncodeError> {
    if let Some(i) = n.as_i64() {
        return Ok(Integer::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Integer::from(u));
    }
    match n.as_f64() {
        Some(f) => Integer::from_f64(f),
        None => Err(EncodeError::TypeError { found: "number" }),
    }
}

/// Converts a JSON value straight to canonical bencode.
///
/// ```
/// let json = serde_json::json!({"string": "foo", "integer": 42});
/// assert_eq!(bencode::encode_json(&json).unwrap(), b"d7:integeri42e6:string3:fooe");
/// ```
pub fn encode_json(json: &serde_json::Value) -> Result<Vec<u8>, EncodeError> {
    from_json(json).map(|value| encode(&value))
}

/// Renders a bencode value as JSON for inspection.
///
/// Byte strings that are valid UTF-8 become JSON strings; others become
/// arrays of byte values. Integers outside i64 become strings. Dictionary
/// keys are decoded lossily and emitted in canonical order.
pub fn to_json(value: &Value<'_>) -> serde_json::Value {
    match value {
        Value::Integer(i) => match i.as_i64() {
            Some(v) => serde_json::Value::Number(v.into()),
            None => serde_json::Value::String(i.to_string()),
        },
        Value::Bytes(b) => match std::str::from_utf8(b) {
            Ok(s) => serde_json::Value::String(s.to_string()),
            Err(_) => serde_json::Value::Array(
                b.iter().map(|&byte| serde_json::Value::Number(byte.into())).collect(),
            ),
        },
        Value::List(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Dict(dict) => {
            let mut map = Map::with_capacity(dict.len());
            for (key, value) in dict.sorted_entries() {
                map.insert(String::from_utf8_lossy(key).into_owned(), to_json(value));
            }
            serde_json::Value::Object(map)
        }
    }
}
