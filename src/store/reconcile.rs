//! Reconciliation of two independently collected statistics stores.
//!
//! The storage layer regularly ends up with two stores for the same
//! player: a previously cached one and a freshly re-read one. Rows that
//! describe the same underlying event appear in both and must be merged
//! rather than kept twice. `reconcile` produces a third store with the
//! union of both inputs and exactly one replacement row per conflicting
//! pair; neither input is modified.

use tracing::debug;

use crate::error::{Result, TallyError};
use crate::model::{Row, StatKind};
use crate::store::PlayerStats;

/// Merge two stores for the same player into one conflict-free store.
///
/// For every declared kind: kinds absent on both sides are skipped
/// entirely; when one side has no rows the other side's rows are taken
/// unchanged; otherwise every row of `ours` is compared against every
/// row of `theirs`, each conflicting pair contributes one merged
/// replacement row, and all rows never consumed by a conflict are
/// appended afterwards. The merged sequence is written even when empty,
/// so the output remembers that the inputs had an opinion about the
/// kind.
///
/// Consumption is tracked by original position, not by structural
/// equality, so a row that happens to equal a conflicting row elsewhere
/// in the same sequence is never dropped with it. A row conflicting
/// with several counterparts yields one merged row per pair and is
/// excluded from the passthrough step once.
///
/// The output's identity is copied from `ours`.
///
/// # Errors
///
/// Fails with [`TallyError::PlayerMismatch`] when the inputs do not
/// describe the same player.
pub fn reconcile(ours: &PlayerStats, theirs: &PlayerStats) -> Result<PlayerStats> {
    if ours.player_id() != theirs.player_id() {
        return Err(TallyError::player_mismatch(
            ours.player_id(),
            theirs.player_id(),
        ));
    }

    let mut merged = PlayerStats::new(ours.player_id());

    for &kind in StatKind::all() {
        if !ours.has_data(kind) && !theirs.has_data(kind) {
            continue;
        }

        merged.set_rows(kind, merge_rows(ours, theirs, kind));
    }

    Ok(merged)
}

/// Merge the rows of one kind from both stores.
fn merge_rows(ours: &PlayerStats, theirs: &PlayerStats, kind: StatKind) -> Vec<Row> {
    let left = ours.rows(kind);
    let right = theirs.rows(kind);

    // One side having no rows means nothing can conflict; take the
    // other side as-is.
    if right.is_empty() {
        return left.to_vec();
    }
    if left.is_empty() {
        return right.to_vec();
    }

    let mut resolved = Vec::new();
    let mut left_consumed = vec![false; left.len()];
    let mut right_consumed = vec![false; right.len()];
    let mut conflicts = 0usize;

    for (i, row) in left.iter().enumerate() {
        for (j, other) in right.iter().enumerate() {
            if row.conflicts_with(other) {
                resolved.push(row.resolve_conflict(other));
                left_consumed[i] = true;
                right_consumed[j] = true;
                conflicts += 1;
            }
        }
    }

    if conflicts > 0 {
        debug!(
            "{}: resolved {} conflicting row pairs for {}",
            ours.player_id(),
            conflicts,
            kind
        );
    }

    for (i, row) in left.iter().enumerate() {
        if !left_consumed[i] {
            resolved.push(row.clone());
        }
    }

    for (j, row) in right.iter().enumerate() {
        if !right_consumed[j] {
            resolved.push(row.clone());
        }
    }

    resolved
}
