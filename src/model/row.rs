//! Statistic rows: one recorded observation per row.
//!
//! A row carries the distinguished value column used for aggregation
//! plus the auxiliary columns the kind's descriptor names (world, item,
//! cause, ...). Rows from two independently collected datasets can
//! describe the same underlying event; [`Row::conflicts_with`] detects
//! that and [`Row::resolve_conflict`] produces the single replacement
//! row the reconciler keeps.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{FieldValue, Requirement};

/// One recorded observation for a statistic kind.
///
/// Structural equality (`PartialEq`) compares the value column and all
/// auxiliary fields; the store's `remove_row` relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// The distinguished numeric column every row carries.
    value: f64,
    /// Auxiliary columns, keyed by column name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<String, FieldValue>,
}

impl Row {
    /// Create a row with the given value and no auxiliary fields.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            fields: BTreeMap::new(),
        }
    }

    /// Add an auxiliary field, replacing any previous value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The distinguished value column.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Look up an auxiliary field by column name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Look up an auxiliary field and coerce it to a number.
    pub fn numeric_field(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(FieldValue::as_f64)
    }

    /// Read-only view of all auxiliary fields.
    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Check whether this row satisfies every requirement in the slice.
    ///
    /// Vacuously true for an empty slice.
    pub fn satisfies(&self, requirements: &[Requirement]) -> bool {
        requirements.iter().all(|req| req.matches(self))
    }

    /// Check whether this row and `other` describe the same event.
    ///
    /// Rows conflict when every auxiliary column present on both sides
    /// holds the same value. Columns present on only one side do not
    /// block; in particular, two rows with no shared auxiliary columns
    /// conflict, which is what deduplicates kinds that record nothing
    /// besides the value.
    pub fn conflicts_with(&self, other: &Row) -> bool {
        self.fields.iter().all(|(name, value)| {
            other
                .fields
                .get(name)
                .map(|theirs| theirs == value)
                .unwrap_or(true)
        })
    }

    /// Merge this row with a conflicting counterpart.
    ///
    /// Keeps this row's auxiliary fields and the larger of the two
    /// values: both rows are snapshots of the same cumulative counter,
    /// so the more advanced one wins. Equal values collapse to a plain
    /// deduplication.
    pub fn resolve_conflict(&self, other: &Row) -> Row {
        let mut resolved = self.clone();
        resolved.value = self.value.max(other.value);
        resolved
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{value: {}", self.value)?;
        for (name, value) in &self.fields {
            write!(f, ", {}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}
