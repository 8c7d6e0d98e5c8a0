//! Error types for the combat core.
//!
//! Combat resolution itself never fails: corrupted or missing state is
//! absorbed locally. These errors only surface at the API edges, when
//! loading data or when a player command arrives in the wrong state.

use crate::combat::context::EncounterState;
use thiserror::Error;

/// Result type alias using [`CombatError`].
pub type Result<T> = std::result::Result<T, CombatError>;

#[derive(Debug, Error)]
pub enum CombatError {
    /// Dataset or config JSON could not be parsed.
    #[error("Failed to parse data: {0}")]
    DataParse(#[from] serde_json::Error),

    /// Dataset or config file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Roster slot index out of range.
    #[error("Roster slot {0} does not exist")]
    InvalidSlot(usize),

    /// Roster slot fainted earlier in this encounter.
    #[error("Roster slot {0} fainted this encounter")]
    SlotFainted(usize),

    /// Roster slot has no HP left.
    #[error("Roster slot {0} cannot battle")]
    SlotUnavailable(usize),

    /// Command is not valid in the current encounter state.
    #[error("Action not allowed while {0:?}")]
    InvalidState(EncounterState),

    /// Capture attempted with an empty bag.
    #[error("No capture items left")]
    NoCaptureItems,
}
