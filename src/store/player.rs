//! The per-player statistics store.
//!
//! `PlayerStats` owns every recorded row for one player, grouped by
//! statistic kind. The storage layer populates and drains it; the
//! presentation layer reads aggregates and individual rows from it.
//! Absence of a kind is always surfaced as an empty sequence, never as
//! a missing marker.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{FieldValue, Requirement, Row, StatKind};

/// All recorded statistics of one player.
///
/// The identity is fixed at construction; the contents change through
/// `set_rows`/`add_row`/`remove_row` as the storage layer syncs rows in
/// and out. The store is an owned in-memory value with no interior
/// locking; one caller owns and mutates it at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    player_id: Uuid,
    statistics: HashMap<StatKind, Vec<Row>>,
}

impl PlayerStats {
    /// Create an empty store for the given player.
    pub fn new(player_id: Uuid) -> Self {
        Self {
            player_id,
            statistics: HashMap::new(),
        }
    }

    /// The player this store describes.
    pub fn player_id(&self) -> Uuid {
        self.player_id
    }

    /// Get the rows stored for a kind.
    ///
    /// Returns an empty slice when the kind has no data; callers never
    /// see a missing marker.
    pub fn rows(&self, kind: StatKind) -> &[Row] {
        self.statistics
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Get one row of a kind by position.
    ///
    /// Returns `None` when `index` is outside `[0, row_count)`.
    pub fn row(&self, kind: StatKind, index: usize) -> Option<&Row> {
        self.rows(kind).get(index)
    }

    /// Check whether this store has been told about a kind.
    ///
    /// An explicitly set empty sequence still counts as data: the store
    /// then knows the kind has no rows, which is different from never
    /// having heard of it.
    pub fn has_data(&self, kind: StatKind) -> bool {
        self.statistics.contains_key(&kind)
    }

    /// Number of rows stored for a kind.
    pub fn row_count(&self, kind: StatKind) -> usize {
        self.rows(kind).len()
    }

    /// Total number of rows across all declared kinds.
    pub fn total_row_count(&self) -> usize {
        StatKind::all()
            .iter()
            .map(|kind| self.row_count(*kind))
            .sum()
    }

    /// Number of kinds with a mapped sequence, empty or not.
    pub fn kind_count(&self) -> usize {
        self.statistics.len()
    }

    /// Look up one column of one row.
    ///
    /// Returns `None` when the row does not exist or the row has no
    /// such column.
    pub fn field(&self, kind: StatKind, index: usize, name: &str) -> Option<&FieldValue> {
        self.row(kind, index).and_then(|row| row.field(name))
    }

    /// Sum of the value column across all rows of a kind.
    ///
    /// 0.0 when the kind has no rows.
    pub fn total_value(&self, kind: StatKind) -> f64 {
        self.rows(kind).iter().map(Row::value).sum()
    }

    /// Sum of the value column across the rows of a kind that satisfy
    /// every given requirement.
    ///
    /// An empty requirement slice is equivalent to [`total_value`].
    ///
    /// [`total_value`]: PlayerStats::total_value
    pub fn total_value_matching(&self, kind: StatKind, requirements: &[Requirement]) -> f64 {
        if requirements.is_empty() {
            return self.total_value(kind);
        }

        self.rows(kind)
            .iter()
            .filter(|row| row.satisfies(requirements))
            .map(Row::value)
            .sum()
    }

    /// Sum of the value column, rounded half-up to `decimals` fractional
    /// digits.
    pub fn total_value_rounded(&self, kind: StatKind, decimals: u32) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        (self.total_value(kind) * factor).round() / factor
    }

    /// Replace the rows stored for a kind.
    ///
    /// Setting an empty sequence is legal and marks the kind as
    /// present with no rows.
    pub fn set_rows(&mut self, kind: StatKind, rows: Vec<Row>) {
        self.statistics.insert(kind, rows);
    }

    /// Append one row to a kind, creating its sequence when absent.
    pub fn add_row(&mut self, kind: StatKind, row: Row) {
        self.statistics.entry(kind).or_default().push(row);
    }

    /// Remove the first row of a kind that is structurally equal to
    /// `row`.
    ///
    /// A no-op when the kind has no data or no row matches.
    pub fn remove_row(&mut self, kind: StatKind, row: &Row) {
        if let Some(rows) = self.statistics.get_mut(&kind) {
            if let Some(position) = rows.iter().position(|candidate| candidate == row) {
                rows.remove(position);
            }
        }
    }

    /// Kinds currently mapped, in declaration order.
    ///
    /// Kinds with an explicitly empty sequence are included.
    pub fn kinds(&self) -> Vec<StatKind> {
        StatKind::all()
            .iter()
            .copied()
            .filter(|kind| self.has_data(*kind))
            .collect()
    }

    /// Every stored row, concatenated in kind declaration order.
    pub fn all_rows(&self) -> Vec<Row> {
        StatKind::all()
            .iter()
            .flat_map(|kind| self.rows(*kind).iter().cloned())
            .collect()
    }

    /// Snapshot of all rows grouped by kind.
    ///
    /// The snapshot is an independent copy; mutating it cannot corrupt
    /// the store.
    pub fn rows_by_kind(&self) -> HashMap<StatKind, Vec<Row>> {
        self.statistics.clone()
    }
}

impl fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerStats of {}: {{", self.player_id)?;
        let mut first = true;
        for kind in self.kinds() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}: [", kind)?;
            for (i, row) in self.rows(kind).iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", row)?;
            }
            write!(f, "]")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PlayerStats {
        PlayerStats::new(Uuid::new_v4())
    }

    #[test]
    fn test_new_store_is_empty() {
        let stats = store();
        assert_eq!(stats.kind_count(), 0);
        assert_eq!(stats.total_row_count(), 0);
        assert!(stats.kinds().is_empty());
        assert!(stats.all_rows().is_empty());
    }

    #[test]
    fn test_rows_absent_kind_is_empty_slice() {
        let stats = store();
        assert!(stats.rows(StatKind::Joins).is_empty());
        assert!(!stats.has_data(StatKind::Joins));
    }

    #[test]
    fn test_set_rows_empty_still_counts_as_data() {
        let mut stats = store();
        stats.set_rows(StatKind::Votes, Vec::new());

        assert!(stats.has_data(StatKind::Votes));
        assert_eq!(stats.row_count(StatKind::Votes), 0);
        assert_eq!(stats.kind_count(), 1);
        assert_eq!(stats.kinds(), vec![StatKind::Votes]);
    }

    #[test]
    fn test_row_index_bounds() {
        let mut stats = store();
        stats.set_rows(StatKind::Deaths, vec![Row::new(1.0), Row::new(2.0)]);

        assert_eq!(stats.row(StatKind::Deaths, 0).unwrap().value(), 1.0);
        assert_eq!(stats.row(StatKind::Deaths, 1).unwrap().value(), 2.0);
        assert!(stats.row(StatKind::Deaths, 2).is_none());
        assert!(stats.row(StatKind::Joins, 0).is_none());
    }

    #[test]
    fn test_field_lookup() {
        let mut stats = store();
        stats.add_row(
            StatKind::KillsMobs,
            Row::new(3.0).with_field("mob", "zombie"),
        );

        assert_eq!(
            stats.field(StatKind::KillsMobs, 0, "mob"),
            Some(&FieldValue::Text("zombie".into()))
        );
        assert!(stats.field(StatKind::KillsMobs, 0, "world").is_none());
        assert!(stats.field(StatKind::KillsMobs, 1, "mob").is_none());
    }

    #[test]
    fn test_add_row_creates_sequence() {
        let mut stats = store();
        stats.add_row(StatKind::Joins, Row::new(1.0));
        stats.add_row(StatKind::Joins, Row::new(2.0));

        assert_eq!(stats.row_count(StatKind::Joins), 2);
        assert_eq!(stats.total_value(StatKind::Joins), 3.0);
    }

    #[test]
    fn test_add_then_remove_restores_total() {
        let mut stats = store();
        stats.set_rows(StatKind::XpGained, vec![Row::new(10.0), Row::new(5.0)]);
        let before = stats.total_value(StatKind::XpGained);

        let row = Row::new(7.0).with_field("world", "end");
        stats.add_row(StatKind::XpGained, row.clone());
        assert_eq!(stats.total_value(StatKind::XpGained), before + 7.0);

        stats.remove_row(StatKind::XpGained, &row);
        assert_eq!(stats.total_value(StatKind::XpGained), before);
    }

    #[test]
    fn test_remove_row_removes_first_match_only() {
        let mut stats = store();
        let dup = Row::new(1.0).with_field("world", "earth");
        stats.set_rows(
            StatKind::Joins,
            vec![dup.clone(), Row::new(2.0), dup.clone()],
        );

        stats.remove_row(StatKind::Joins, &dup);

        assert_eq!(stats.row_count(StatKind::Joins), 2);
        assert_eq!(stats.row(StatKind::Joins, 0).unwrap().value(), 2.0);
        assert_eq!(stats.row(StatKind::Joins, 1), Some(&dup));
    }

    #[test]
    fn test_remove_row_without_data_is_noop() {
        let mut stats = store();
        stats.remove_row(StatKind::Joins, &Row::new(1.0));
        assert!(!stats.has_data(StatKind::Joins));
    }

    #[test]
    fn test_total_value_matching_filters() {
        let mut stats = store();
        stats.set_rows(
            StatKind::BlocksBroken,
            vec![
                Row::new(5.0).with_field("world", "earth"),
                Row::new(3.0).with_field("world", "nether"),
                Row::new(2.0).with_field("world", "earth"),
            ],
        );

        let earth = [Requirement::new("world", "earth")];
        assert_eq!(stats.total_value_matching(StatKind::BlocksBroken, &earth), 7.0);

        let nether = [Requirement::new("world", "nether")];
        assert_eq!(
            stats.total_value_matching(StatKind::BlocksBroken, &nether),
            3.0
        );

        let none = [Requirement::new("world", "end")];
        assert_eq!(stats.total_value_matching(StatKind::BlocksBroken, &none), 0.0);
    }

    #[test]
    fn test_total_value_matching_empty_equals_total() {
        let mut stats = store();
        stats.set_rows(
            StatKind::Deaths,
            vec![Row::new(1.5).with_field("world", "earth"), Row::new(2.5)],
        );

        assert_eq!(
            stats.total_value_matching(StatKind::Deaths, &[]),
            stats.total_value(StatKind::Deaths)
        );
    }

    #[test]
    fn test_total_value_rounded_half_up() {
        let mut stats = store();
        stats.set_rows(
            StatKind::DistanceTravelled,
            vec![Row::new(1.005), Row::new(1.004)],
        );

        assert_eq!(stats.total_value_rounded(StatKind::DistanceTravelled, 2), 2.01);
        assert_eq!(stats.total_value_rounded(StatKind::DistanceTravelled, 0), 2.0);
    }

    #[test]
    fn test_total_row_count_spans_kinds() {
        let mut stats = store();
        stats.set_rows(StatKind::Joins, vec![Row::new(1.0)]);
        stats.set_rows(StatKind::Deaths, vec![Row::new(1.0), Row::new(2.0)]);
        stats.set_rows(StatKind::Votes, Vec::new());

        assert_eq!(stats.total_row_count(), 3);
        assert_eq!(stats.kind_count(), 3);
    }

    #[test]
    fn test_kinds_and_all_rows_follow_declaration_order() {
        let mut stats = store();
        // Insert out of declaration order.
        stats.set_rows(StatKind::XpGained, vec![Row::new(30.0)]);
        stats.set_rows(StatKind::Joins, vec![Row::new(1.0)]);
        stats.set_rows(StatKind::Deaths, vec![Row::new(2.0)]);

        assert_eq!(
            stats.kinds(),
            vec![StatKind::Joins, StatKind::Deaths, StatKind::XpGained]
        );

        let values: Vec<f64> = stats.all_rows().iter().map(Row::value).collect();
        assert_eq!(values, vec![1.0, 2.0, 30.0]);
    }

    #[test]
    fn test_rows_by_kind_is_defensive() {
        let mut stats = store();
        stats.set_rows(StatKind::Joins, vec![Row::new(1.0)]);

        let mut snapshot = stats.rows_by_kind();
        snapshot.get_mut(&StatKind::Joins).unwrap().clear();
        snapshot.insert(StatKind::Votes, vec![Row::new(9.0)]);

        assert_eq!(stats.row_count(StatKind::Joins), 1);
        assert!(!stats.has_data(StatKind::Votes));
    }

    #[test]
    fn test_display_lists_kinds_and_rows() {
        let mut stats = PlayerStats::new(Uuid::nil());
        stats.set_rows(StatKind::Joins, vec![Row::new(1.0)]);
        stats.set_rows(StatKind::Deaths, vec![Row::new(2.0).with_field("world", "earth")]);

        let dump = stats.to_string();
        assert!(dump.starts_with("PlayerStats of 00000000-0000-0000-0000-000000000000: {"));
        assert!(dump.contains("joins: [{value: 1}]"));
        assert!(dump.contains("deaths: [{value: 2, world: earth}]"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut stats = store();
        stats.set_rows(
            StatKind::ItemsCaught,
            vec![Row::new(1.0).with_field("caught", "salmon")],
        );

        let json = serde_json::to_string(&stats).unwrap();
        let back: PlayerStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_kind() -> impl Strategy<Value = StatKind> {
            proptest::sample::select(StatKind::all().to_vec())
        }

        // Quarter-step values keep f64 sums exact so the totals below
        // compare with equality.
        fn arb_row() -> impl Strategy<Value = Row> {
            (
                0u32..4000,
                proptest::sample::select(vec!["earth", "nether", "end"]),
            )
                .prop_map(|(quarters, world)| {
                    Row::new(quarters as f64 / 4.0).with_field("world", world)
                })
        }

        proptest! {
            // Property: adding a row raises the total by exactly its value
            // and removing it again restores the previous total.
            #[test]
            fn prop_add_remove_total_symmetry(
                kind in arb_kind(),
                rows in proptest::collection::vec(arb_row(), 0..8),
                row in arb_row(),
            ) {
                let mut stats = PlayerStats::new(Uuid::nil());
                stats.set_rows(kind, rows);
                let before = stats.total_value(kind);

                stats.add_row(kind, row.clone());
                prop_assert_eq!(stats.total_value(kind), before + row.value());

                stats.remove_row(kind, &row);
                prop_assert_eq!(stats.total_value(kind), before);
            }

            // Property: the grand total is the sum of the per-kind counts.
            #[test]
            fn prop_total_row_count_consistent(
                rows in proptest::collection::vec((arb_kind(), arb_row()), 0..24),
            ) {
                let mut stats = PlayerStats::new(Uuid::nil());
                for (kind, row) in rows {
                    stats.add_row(kind, row);
                }

                let per_kind: usize = StatKind::all()
                    .iter()
                    .map(|kind| stats.row_count(*kind))
                    .sum();
                prop_assert_eq!(stats.total_row_count(), per_kind);
            }

            // Property: filtering with no requirements never changes the sum.
            #[test]
            fn prop_empty_requirements_is_identity(
                kind in arb_kind(),
                rows in proptest::collection::vec(arb_row(), 0..8),
            ) {
                let mut stats = PlayerStats::new(Uuid::nil());
                stats.set_rows(kind, rows);

                prop_assert_eq!(
                    stats.total_value_matching(kind, &[]),
                    stats.total_value(kind)
                );
            }
        }
    }
}
