//! Unified error types for Tally.
//!
//! Absence is not an error in this crate: lookups that can legitimately
//! find nothing (a row index, a column name) return `Option` instead.
//! Errors are reserved for arguments that are actually invalid, such as
//! an unknown statistic name coming from storage or an attempt to
//! reconcile stores that describe different players.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for Tally operations.
#[derive(Error, Debug)]
pub enum TallyError {
    /// A statistic name read from storage does not match any declared kind.
    #[error("unknown statistic kind: {name}")]
    UnknownKind { name: String },

    /// Two stores were reconciled that do not describe the same player.
    #[error("player mismatch: cannot reconcile {ours} with {theirs}")]
    PlayerMismatch { ours: Uuid, theirs: Uuid },
}

/// A specialized Result type for Tally operations.
pub type Result<T> = std::result::Result<T, TallyError>;

impl TallyError {
    /// Create an unknown-kind error.
    pub fn unknown_kind(name: impl Into<String>) -> Self {
        Self::UnknownKind { name: name.into() }
    }

    /// Create a player mismatch error.
    pub fn player_mismatch(ours: Uuid, theirs: Uuid) -> Self {
        Self::PlayerMismatch { ours, theirs }
    }
}
