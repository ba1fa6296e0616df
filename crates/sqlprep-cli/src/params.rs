//! JSON encoding of template parameters.
//!
//! | JSON | parameter |
//! |------|-----------|
//! | `null`, `true`, `1`, `1.5`, `"text"` | scalar |
//! | `[1, 2]` | sequence (`?a`) |
//! | `[[1, "a"], [2, "b"]]` | rows (`?M`) |
//! | `{"name": "Ann"}` | mapping (`?A`), key order preserved |
//! | `{"$raw": "NOW()"}` | raw SQL (`?r`) |
//! | `{"$date": "2024-01-02T03:04:05+01:00"}` | timestamp (`?d`) |

use chrono::DateTime;
use serde_json::Value as Json;
use sqlprep_core::Value;

use crate::error::{CliError, Result};

const RAW_MARKER: &str = "$raw";
const DATE_MARKER: &str = "$date";

/// Parses a JSON array into positional parameters.
///
/// # Errors
///
/// Fails if `json` is not a JSON array, a marker object is malformed, or an
/// integer does not fit in an `i64`.
pub fn parse_params(json: &str) -> Result<Vec<Value>> {
    match serde_json::from_str::<Json>(json)? {
        Json::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| convert(index, item))
            .collect(),
        other => Err(CliError::NotAnArray(json_type(&other))),
    }
}

const fn json_type(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn convert(index: usize, json: Json) -> Result<Value> {
    let value = match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
                Value::Float(f)
            } else {
                // u64 above i64::MAX
                return Err(CliError::Number {
                    index,
                    number: n.to_string(),
                });
            }
        }
        Json::String(s) => Value::Text(s),
        Json::Array(items) => {
            let values = items
                .into_iter()
                .map(|item| convert(index, item))
                .collect::<Result<Vec<_>>>()?;
            if !values.is_empty() && values.iter().all(|v| matches!(v, Value::List(_))) {
                Value::Rows(
                    values
                        .into_iter()
                        .filter_map(|v| match v {
                            Value::List(row) => Some(row),
                            _ => None,
                        })
                        .collect(),
                )
            } else {
                Value::List(values)
            }
        }
        Json::Object(mut map) => {
            if map.len() == 1 {
                if let Some(raw) = map.remove(RAW_MARKER) {
                    return marker_text(index, RAW_MARKER, raw).map(Value::raw);
                }
                if let Some(date) = map.remove(DATE_MARKER) {
                    let text = marker_text(index, DATE_MARKER, date)?;
                    return DateTime::parse_from_rfc3339(&text)
                        .map(Value::Timestamp)
                        .map_err(|source| CliError::Timestamp {
                            index,
                            value: text,
                            source,
                        });
                }
            }
            Value::Map(
                map.into_iter()
                    .map(|(key, v)| Ok((key, convert(index, v)?)))
                    .collect::<Result<_>>()?,
            )
        }
    };
    Ok(value)
}

fn marker_text(index: usize, marker: &'static str, json: Json) -> Result<String> {
    match json {
        Json::String(s) => Ok(s),
        _ => Err(CliError::MarkerType { index, marker }),
    }
}
