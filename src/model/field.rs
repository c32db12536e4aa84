//! Typed auxiliary column values for statistic rows.
//!
//! Storage hands rows back as loosely typed columns. `FieldValue` keeps
//! the three shapes that actually occur (integers, reals, text) and
//! offers the lenient numeric coercion the rest of the crate relies on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single auxiliary column value in a statistic row.
///
/// Serialized untagged, so rows round-trip through JSON as plain
/// objects: `{"world": "earth", "typeid": 5}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A whole-number column (block type ids, data values).
    Int(i64),
    /// A fractional column (bow force, distances).
    Real(f64),
    /// A textual column (world names, item names, commands).
    Text(String),
}

impl FieldValue {
    /// Interpret this value as a number.
    ///
    /// Integers and reals convert directly; text is parsed if it
    /// happens to contain a number. Returns `None` when no numeric
    /// reading exists.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Real(r) => Some(*r),
            FieldValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Interpret this value as an integer, truncating reals.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::Real(r) => Some(*r as i64),
            FieldValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Borrow the text content, if this is a textual value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert a JSON value from the storage boundary.
    ///
    /// Returns `None` for shapes a column cannot hold (objects, arrays,
    /// null).
    pub fn from_json(value: &serde_json::Value) -> Option<FieldValue> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(FieldValue::Int(i))
                } else {
                    n.as_f64().map(FieldValue::Real)
                }
            }
            serde_json::Value::String(s) => Some(FieldValue::Text(s.clone())),
            serde_json::Value::Bool(b) => Some(FieldValue::Int(*b as i64)),
            _ => None,
        }
    }

    /// Convert into a JSON value for the storage boundary.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Int(i) => serde_json::Value::from(*i),
            FieldValue::Real(r) => serde_json::Value::from(*r),
            FieldValue::Text(s) => serde_json::Value::from(s.clone()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Real(r) => write!(f, "{}", r),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Real(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}
