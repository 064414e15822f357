//! Raw JSON tables, before any typing or normalization.
//!
//! Two layouts are accepted: an array of records
//! (`[{"name": .., "loudness": ..}, ..]`) and a column-oriented object
//! (`{"name": {"0": .., "1": ..}, "loudness": {..}}`), with either keyed or
//! positional (array) column values.

use super::DataError;
use super::LoadError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct RawTable {
    pub name: &'static str,
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Debug, Clone)]
pub struct Row {
    index: usize,
    fields: Map<String, Value>,
}

impl RawTable {
    pub fn read(name: &'static str, path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json_str(name, &text)
    }

    pub fn from_json_str(name: &'static str, text: &str) -> Result<Self, LoadError> {
        let value: Value =
            serde_json::from_str(text).map_err(|source| LoadError::Json { table: name, source })?;
        Self::from_value(name, value)
    }

    pub fn from_value(name: &'static str, value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Array(records) => Self::from_records(name, records),
            Value::Object(columns) => Self::from_columns(name, columns),
            other => Err(LoadError::UnsupportedLayout {
                table: name,
                reason: format!("expected an array or an object, found {}", type_name(&other)),
            }),
        }
    }

    fn from_records(name: &'static str, records: Vec<Value>) -> Result<Self, LoadError> {
        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            match record {
                Value::Object(fields) => rows.push(Row { index, fields }),
                other => {
                    return Err(LoadError::UnsupportedLayout {
                        table: name,
                        reason: format!("record {} is {}, not an object", index, type_name(&other)),
                    })
                }
            }
        }
        let columns = rows
            .first()
            .map(|row| row.fields.keys().cloned().collect())
            .unwrap_or_default();
        Ok(RawTable {
            name,
            columns,
            rows,
        })
    }

    fn from_columns(name: &'static str, columns: Map<String, Value>) -> Result<Self, LoadError> {
        let mut by_row: BTreeMap<usize, Map<String, Value>> = BTreeMap::new();
        let column_names: Vec<String> = columns.keys().cloned().collect();

        for (column, values) in columns {
            match values {
                Value::Object(cells) => {
                    for (key, cell) in cells {
                        let row_key: usize = key.parse().map_err(|_| LoadError::UnsupportedLayout {
                            table: name,
                            reason: format!("row key '{}' in column '{}' is not an index", key, column),
                        })?;
                        by_row.entry(row_key).or_default().insert(column.clone(), cell);
                    }
                }
                Value::Array(cells) => {
                    for (row_key, cell) in cells.into_iter().enumerate() {
                        by_row.entry(row_key).or_default().insert(column.clone(), cell);
                    }
                }
                other => {
                    return Err(LoadError::UnsupportedLayout {
                        table: name,
                        reason: format!(
                            "column '{}' holds {}, expected an object or an array",
                            column,
                            type_name(&other)
                        ),
                    })
                }
            }
        }

        let rows = by_row
            .into_iter()
            .map(|(index, fields)| Row { index, fields })
            .collect();
        Ok(RawTable {
            name,
            columns: column_names,
            rows,
        })
    }

    /// Fails with the first required column that is not part of the schema.
    pub fn require_columns(&self, required: &[&'static str]) -> Result<(), LoadError> {
        if self.rows.is_empty() {
            return Err(LoadError::EmptyTable { table: self.name });
        }
        for column in required.iter().copied() {
            if !self.columns.iter().any(|c| c == column) {
                return Err(LoadError::MissingColumn {
                    table: self.name,
                    column,
                });
            }
        }
        Ok(())
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Row {
    pub fn index(&self) -> usize {
        self.index
    }

    fn present(&self, column: &'static str) -> Result<&Value, DataError> {
        match self.fields.get(column) {
            None | Some(Value::Null) => Err(DataError::MissingValue {
                row: self.index,
                column,
            }),
            Some(value) => Ok(value),
        }
    }

    fn invalid(&self, column: &'static str, value: &Value) -> DataError {
        DataError::InvalidValue {
            row: self.index,
            column,
            value: value.to_string(),
        }
    }

    /// Strict string value.
    pub fn string(&self, column: &'static str) -> Result<String, DataError> {
        match self.present(column)? {
            Value::String(s) => Ok(s.clone()),
            other => Err(self.invalid(column, other)),
        }
    }

    /// Display text: strings as they are, numbers and booleans stringified.
    pub fn text(&self, column: &'static str) -> Result<String, DataError> {
        match self.present(column)? {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(self.invalid(column, other)),
        }
    }

    pub fn number(&self, column: &'static str) -> Result<f64, DataError> {
        let value = self.present(column)?;
        value.as_f64().ok_or_else(|| self.invalid(column, value))
    }

    /// Optional string, empty strings read as absent.
    pub fn optional_string(&self, column: &str) -> Option<String> {
        match self.fields.get(column) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
