// Copyright 2015-2023 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! JSON as a concrete wire format for the [`Value`] tree. Timestamps cross
//! the wire as epoch millisecond numbers; everything else maps directly.
//! The core stays format-agnostic, so this crate is the only place JSON
//! machinery appears.

use serde_json::{Map as JsonMap, Number, Value as JsonValue};
use thiserror::Error;

use wireform_model::{DuplicateKeyError, Value};

#[derive(Error, Debug)]
pub enum JsonError {
    /// The document failed to parse or serialize.
    #[error("Invalid JSON document: {0}")]
    Document(#[from] serde_json::Error),
    /// A map value carried the same key twice; JSON objects cannot.
    #[error("{0}")]
    DuplicateKey(#[from] DuplicateKeyError),
    /// A floating point value with no JSON representation (NaN or an
    /// infinity).
    #[error("Number {0} cannot be represented in a JSON document.")]
    UnrepresentableNumber(f64),
}

/// Realize a value as a JSON tree.
pub fn to_json(value: &Value) -> Result<JsonValue, JsonError> {
    match value {
        Value::Null => Ok(JsonValue::Null),
        Value::BooleanValue(p) => Ok(JsonValue::Bool(*p)),
        Value::Int64Value(n) => Ok(JsonValue::Number((*n).into())),
        Value::Float64Value(x) => Number::from_f64(*x)
            .map(JsonValue::Number)
            .ok_or(JsonError::UnrepresentableNumber(*x)),
        Value::Text(s) => Ok(JsonValue::String(s.clone())),
        Value::Timestamp(ts) => Ok(JsonValue::Number(ts.millis().into())),
        Value::List(items) => items
            .iter()
            .map(to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(JsonValue::Array),
        Value::Map(entries) => {
            let mut object = JsonMap::new();
            for (key, value) in entries {
                if object.insert(key.clone(), to_json(value)?).is_some() {
                    return Err(DuplicateKeyError { key: key.clone() }.into());
                }
            }
            Ok(JsonValue::Object(object))
        }
    }
}

/// Read a JSON tree into a value. Integral numbers become `Int64Value` and
/// all others `Float64Value`; whether a number was in fact an epoch
/// timestamp is only known to the schema, so the distinction is drawn by
/// the decoder, not here.
pub fn from_json(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(p) => Value::BooleanValue(*p),
        JsonValue::Number(n) => n
            .as_i64()
            .map(Value::Int64Value)
            .or_else(|| n.as_f64().map(Value::Float64Value))
            .unwrap_or(Value::Null),
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(items) => Value::List(items.iter().map(from_json).collect()),
        JsonValue::Object(object) => Value::Map(
            object
                .iter()
                .map(|(key, value)| (key.clone(), from_json(value)))
                .collect(),
        ),
    }
}

/// Serialize a value to JSON text.
pub fn print_json(value: &Value) -> Result<String, JsonError> {
    let json = to_json(value)?;
    Ok(serde_json::to_string(&json)?)
}

/// Parse JSON text into a value.
pub fn parse_json(text: &str) -> Result<Value, JsonError> {
    let json: JsonValue = serde_json::from_str(text)?;
    Ok(from_json(&json))
}
