//! Structured serialization of parse results and invocations.

use crate::OutputMode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during serialization.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("CSV serialization failed: {0}")]
    Csv(String),

    #[error("text output is not a structured mode")]
    NotStructured,
}

/// Serializes `data` in the given structured mode.
pub fn serialize_structured<T: Serialize>(
    data: &T,
    mode: OutputMode,
) -> Result<String, SerializeError> {
    match mode {
        OutputMode::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputMode::Xml => Ok(quick_xml::se::to_string(data)?),
        OutputMode::Csv => to_csv(&serde_json::to_value(data)?),
        OutputMode::Text => Err(SerializeError::NotStructured),
    }
}

/// Writes a value as CSV.
///
/// An object becomes one header row (keys in sorted order) and one value
/// row. An array of objects becomes one row per element, headed by the
/// first element's keys.
/// Anything else is a single `value` column.
fn to_csv(value: &Value) -> Result<String, SerializeError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let csv_err = |e: csv::Error| SerializeError::Csv(e.to_string());

    match value {
        Value::Object(obj) => {
            wtr.write_record(obj.keys()).map_err(csv_err)?;
            wtr.write_record(obj.values().map(cell)).map_err(csv_err)?;
        }
        Value::Array(rows) if matches!(rows.first(), Some(Value::Object(_))) => {
            let headers: Vec<&str> = match rows.first() {
                Some(Value::Object(first)) => first.keys().map(String::as_str).collect(),
                _ => Vec::new(),
            };
            wtr.write_record(&headers).map_err(csv_err)?;
            for row in rows {
                if let Value::Object(obj) = row {
                    let cells: Vec<String> = headers
                        .iter()
                        .map(|h| obj.get(*h).map(cell).unwrap_or_default())
                        .collect();
                    wtr.write_record(&cells).map_err(csv_err)?;
                }
            }
        }
        Value::Array(items) => {
            wtr.write_record(["value"]).map_err(csv_err)?;
            for item in items {
                wtr.write_record([cell(item)]).map_err(csv_err)?;
            }
        }
        other => {
            wtr.write_record(["value"]).map_err(csv_err)?;
            wtr.write_record([cell(other)]).map_err(csv_err)?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| SerializeError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SerializeError::Csv(e.to_string()))
}

/// A single CSV cell. Lists of strings are joined with `/`.
fn cell(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("/"),
        other => other.to_string(),
    }
}
