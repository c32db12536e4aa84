//! Row predicates for filtered aggregation.
//!
//! A requirement pins one auxiliary column to an expected value. Sums
//! over a statistic can be narrowed to the rows that satisfy every
//! requirement in a slice; an empty slice filters nothing.

use serde::{Deserialize, Serialize};

use crate::model::Row;

/// A condition on one auxiliary column of a row.
///
/// Comparison happens on the textual rendering of the column value and
/// ignores ASCII case, so `Requirement::new("world", "Earth")` matches
/// a row whose world column holds `"earth"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    column: String,
    expected: String,
}

impl Requirement {
    /// Create a requirement on the given column.
    pub fn new(column: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            expected: expected.into(),
        }
    }

    /// The column this requirement inspects.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The value the column must hold.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Check whether the given row satisfies this requirement.
    ///
    /// A row without the column never matches.
    pub fn matches(&self, row: &Row) -> bool {
        row.field(&self.column)
            .map(|value| value.to_string().eq_ignore_ascii_case(&self.expected))
            .unwrap_or(false)
    }
}
