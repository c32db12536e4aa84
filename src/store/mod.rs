//! The statistics store and its reconciler.
//!
//! This module owns the per-player store that maps statistic kinds to
//! recorded rows, and the reconciliation algorithm that unifies two
//! independently collected stores for the same player.

pub mod player;
pub mod reconcile;

pub use player::PlayerStats;
pub use reconcile::reconcile;
