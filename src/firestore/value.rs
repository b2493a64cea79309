//! Conversion between plain JSON and the database's typed-value encoding.
//!
//! A document on the wire looks like
//! `{"name": ".../documents/projects/abc", "fields": {"name": {"stringValue": "x"}}}`.
//! Content records are plain serde structs, so every read goes through
//! [`decode_document`] and every write through [`encode_fields`].

use super::FirestoreError;
use serde_json::{json, Map, Value};

/// Encode one JSON value as a typed value.
///
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // Integers travel as decimal strings.
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or_default() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_map(map) } }),
    }
}

fn encode_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect()
}

/// Encode a JSON object as a document `fields` map.
///
pub fn encode_fields(value: &Value) -> Result<Map<String, Value>, FirestoreError> {
    match value {
        Value::Object(map) => Ok(encode_map(map)),
        other => Err(FirestoreError::MalformedValue(format!(
            "document body must be an object, got {}",
            other
        ))),
    }
}

/// Decode one typed value into plain JSON.
///
pub fn decode_value(value: &Value) -> Result<Value, FirestoreError> {
    let object = value
        .as_object()
        .ok_or_else(|| FirestoreError::MalformedValue(value.to_string()))?;
    let (kind, inner) = object
        .iter()
        .next()
        .ok_or_else(|| FirestoreError::MalformedValue("empty value".to_string()))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" | "doubleValue" => Ok(inner.clone()),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => Ok(inner.clone()),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| FirestoreError::MalformedValue(format!("integerValue {}", s))),
            Value::Number(_) => Ok(inner.clone()),
            _ => Err(FirestoreError::MalformedValue(format!(
                "integerValue {}",
                inner
            ))),
        },
        "arrayValue" => {
            let values = match inner.get("values").and_then(Value::as_array) {
                Some(values) => values
                    .iter()
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()?,
                None => vec![],
            };
            Ok(Value::Array(values))
        }
        "mapValue" => match inner.get("fields").and_then(Value::as_object) {
            Some(fields) => Ok(Value::Object(decode_fields(fields)?)),
            None => Ok(Value::Object(Map::new())),
        },
        "geoPointValue" => Ok(inner.clone()),
        other => Err(FirestoreError::MalformedValue(format!(
            "unknown value kind {}",
            other
        ))),
    }
}

fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, FirestoreError> {
    fields
        .iter()
        .map(|(k, v)| Ok((k.clone(), decode_value(v)?)))
        .collect()
}

/// Last path segment of a document resource name.
///
pub fn document_id(name: &str) -> Option<&str> {
    name.rsplit('/').next().filter(|id| !id.is_empty())
}

/// Decode a whole document into a JSON object, adding its `id`.
///
pub fn decode_document(document: &Value) -> Result<Value, FirestoreError> {
    let mut object = match document.get("fields").and_then(Value::as_object) {
        Some(fields) => decode_fields(fields)?,
        None => Map::new(),
    };
    if let Some(id) = document
        .get("name")
        .and_then(Value::as_str)
        .and_then(document_id)
    {
        object.insert("id".to_string(), Value::from(id));
    }
    Ok(Value::Object(object))
}
