//! Error types for the bomb runtime.
//!
//! Strongly-typed errors for the two layers of the device: puzzle modules
//! (rejected inputs) and the bomb itself (addressing, terminal state, invalid
//! loadouts). None of them is fatal; callers recover locally.

use thiserror::Error;

use crate::{BombStatus, ModuleKind};

/// Errors raised by a single puzzle module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// The input variant does not apply to this kind of module.
    #[error("{kind} module does not accept {input}")]
    UnsupportedInput {
        /// Module that rejected the input.
        kind: ModuleKind,
        /// Short name of the rejected input.
        input: &'static str,
    },

    /// The input addresses a component the module does not have.
    #[error("{kind} module has no choice {index}")]
    NoSuchChoice {
        /// Module that rejected the input.
        kind: ModuleKind,
        /// Requested component index.
        index: usize,
    },
}

/// Errors raised by the bomb model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BombError {
    /// Module index outside the bomb.
    #[error("module index {index} out of range (bomb has {len} modules)")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of modules on the bomb.
        len: usize,
    },

    /// The bomb already left the arming state and cannot change.
    #[error("bomb is {status:?} and can no longer change")]
    Terminal {
        /// Terminal status the bomb is frozen in.
        status: BombStatus,
    },

    /// The addressed module is solved and accepts no further input.
    #[error("module {index} is already solved")]
    ModuleSolved {
        /// Index of the solved module.
        index: usize,
    },

    /// Loadout cannot form a playable bomb.
    #[error("invalid loadout: {reason}")]
    InvalidLoadout {
        /// What is wrong with the loadout.
        reason: String,
    },

    /// The module rejected the input.
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}
