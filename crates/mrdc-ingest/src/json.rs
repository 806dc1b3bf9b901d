//! JSON documents to frames.
//!
//! Two layouts are accepted:
//!
//! - a list of records: `[{"a": 1, "b": "x"}, ...]`
//! - a column mapping keyed by row index: `{"a": {"0": 1, "1": 2}, ...}`
//!
//! Column types are inferred from the values: all integers give `Int64`, any
//! other numbers `Float64`, all booleans `Boolean`, and anything else text.

use std::collections::HashSet;

use polars::prelude::{Column, DataFrame, NamedFrom};
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};

static NULL: Value = Value::Null;

pub fn read_json_bytes(bytes: &[u8], location: &str) -> Result<DataFrame> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| IngestError::JsonParse {
        location: location.to_string(),
        source,
    })?;
    frame_from_json(value, location)
}

pub fn frame_from_json(value: Value, location: &str) -> Result<DataFrame> {
    match value {
        Value::Array(items) => {
            let records = items
                .into_iter()
                .map(|item| match item {
                    Value::Object(record) => Ok(record),
                    other => Err(IngestError::JsonLayout {
                        location: location.to_string(),
                        reason: format!("expected an object per record, found {other}"),
                    }),
                })
                .collect::<Result<Vec<_>>>()?;
            frame_from_records(&records)
        }
        Value::Object(columns) => frame_from_column_map(columns, location),
        other => Err(IngestError::JsonLayout {
            location: location.to_string(),
            reason: format!("expected an array or object at the top level, found {other}"),
        }),
    }
}

/// Builds a frame from JSON records. Keys missing from a record are null.
pub fn frame_from_records(records: &[Map<String, Value>]) -> Result<DataFrame> {
    let mut names: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.as_str()) {
                names.push(key);
            }
        }
    }
    let columns: Vec<Column> = names
        .iter()
        .map(|name| {
            let values: Vec<&Value> = records
                .iter()
                .map(|record| record.get(*name).unwrap_or(&NULL))
                .collect();
            json_column(name, &values)
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

fn frame_from_column_map(columns: Map<String, Value>, location: &str) -> Result<DataFrame> {
    let mut index: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for cells in columns.values() {
        let Value::Object(cells) = cells else {
            return Err(IngestError::JsonLayout {
                location: location.to_string(),
                reason: "expected each column to map row index to value".to_string(),
            });
        };
        for key in cells.keys() {
            if seen.insert(key.as_str()) {
                index.push(key);
            }
        }
    }
    if index.iter().all(|key| key.parse::<usize>().is_ok()) {
        index.sort_by_key(|key| key.parse::<usize>().unwrap_or(usize::MAX));
    }

    let frame_columns: Vec<Column> = columns
        .iter()
        .map(|(name, cells)| {
            let values: Vec<&Value> = index
                .iter()
                .map(|key| cells.get(*key).unwrap_or(&NULL))
                .collect();
            json_column(name, &values)
        })
        .collect();
    Ok(DataFrame::new(frame_columns)?)
}

fn json_column(name: &str, values: &[&Value]) -> Column {
    let present: Vec<&Value> = values.iter().copied().filter(|v| !v.is_null()).collect();
    if !present.is_empty() && present.iter().all(|v| v.as_i64().is_some()) {
        let ints: Vec<Option<i64>> = values.iter().map(|v| v.as_i64()).collect();
        return Column::new(name.into(), ints);
    }
    if !present.is_empty() && present.iter().all(|v| v.is_number()) {
        let floats: Vec<Option<f64>> = values.iter().map(|v| v.as_f64()).collect();
        return Column::new(name.into(), floats);
    }
    if !present.is_empty() && present.iter().all(|v| v.is_boolean()) {
        let bools: Vec<Option<bool>> = values.iter().map(|v| v.as_bool()).collect();
        return Column::new(name.into(), bools);
    }
    let text: Vec<Option<String>> = values.iter().copied().map(json_text).collect();
    Column::new(name.into(), text)
}

fn json_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
