use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::schema::{self, ID_COLUMN};
use crate::{Error, Result};

/// Integer identifier of a loan application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Parse a caller-supplied identifier.
    ///
    /// Accepts integers and whole floats (`"3"`, `"3.0"`). Anything else
    /// yields `None`, which callers treat the same as an unknown id.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(i) = raw.parse::<i64>() {
            return Some(RecordId(i));
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some(RecordId(f as i64))
            }
            _ => None,
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId).or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| RecordId(f as i64))
            }),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(i: i64) -> Self {
        RecordId(i)
    }
}

/// A single cell of a record
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Convert a JSON scalar. Arrays and objects are not valid cells.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(FieldValue::Null),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => Some(match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => FieldValue::Float(n.as_f64()?),
            }),
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Exact-equality agreement between two cells.
    ///
    /// Integers and floats compare numerically. Null agrees with nothing,
    /// not even another null.
    pub fn agrees_with(&self, other: &FieldValue) -> bool {
        match (self, other) {
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a == b,
            (FieldValue::Integer(a), FieldValue::Float(b))
            | (FieldValue::Float(b), FieldValue::Integer(a)) => *a as f64 == *b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            _ => false,
        }
    }

    /// Numeric view of the cell. Text is never numeric, even `"1169"`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            FieldValue::Text(_) | FieldValue::Bool(_) | FieldValue::Null => None,
        }
    }

    /// Label of the cell when treated as a category.
    ///
    /// Whole floats render as integers so `1` and `1.0` land in the same
    /// category; booleans render as `True`/`False`.
    pub fn category_label(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(true) => Some("True".to_string()),
            FieldValue::Bool(false) => Some("False".to_string()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                Some(format!("{}", *f as i64))
            }
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// One loan application: an identifier plus named cells
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    #[inline]
    #[must_use]
    pub fn new(id: RecordId) -> Self {
        Self {
            id,
            fields: BTreeMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let name = name.into();
        if name != ID_COLUMN {
            self.fields.insert(name, value.into());
        }
        self
    }

    /// Build a record from one dataset row.
    ///
    /// Every column of [`schema::RECORD_COLUMNS`] must be present (null cells
    /// are allowed), the identifier must be an integer, and extra columns are
    /// kept as-is. `location` names the row in error messages.
    pub fn from_row(row: &Map<String, Value>, location: &str) -> Result<Self> {
        for column in schema::RECORD_COLUMNS.iter() {
            if !row.contains_key(column.name) {
                return Err(Error::MissingColumn {
                    column: column.name.to_string(),
                    location: location.to_string(),
                });
            }
        }

        let id = row
            .get(ID_COLUMN)
            .and_then(RecordId::from_json)
            .ok_or_else(|| Error::load(location, "identifier is not an integer"))?;

        let mut fields = BTreeMap::new();
        for (name, value) in row {
            if name == ID_COLUMN {
                continue;
            }
            let cell = FieldValue::from_json(value).ok_or_else(|| {
                Error::load(location, format!("column '{}' is not a scalar", name))
            })?;
            fields.insert(name.clone(), cell);
        }

        Ok(Self { id, fields })
    }

    /// Get a cell by column name. The identifier is not a cell; use `id`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Iterate cells in column-name order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns including the identifier
    pub fn column_count(&self) -> usize {
        self.fields.len() + 1
    }
}
