//! Errors returned by the App state machine.
//!
//! Every variant is recoverable: the App stays in its current state and the
//! error text becomes the status line.

use defuse_core::{BombError, ContextError, LoadError};
use thiserror::Error;

use crate::AppState;

/// Rejected event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The event is not accepted in the current state.
    #[error("{event} is not valid in {state}")]
    InvalidTransition {
        /// State that rejected the event.
        state: AppState,
        /// Name of the rejected event.
        event: &'static str,
    },

    /// Module index outside the bomb.
    #[error("module {index} out of range (bomb has {len})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of modules.
        len: usize,
    },

    /// The event payload does not fit the current data.
    #[error("invalid event: {reason}")]
    InvalidEvent {
        /// What was wrong with the payload.
        reason: String,
    },

    /// The loader could not build a bomb.
    #[error("load failed: {reason}")]
    LoadFailure {
        /// Loader error text.
        reason: String,
    },
}

impl From<BombError> for AppError {
    fn from(err: BombError) -> Self {
        match err {
            BombError::OutOfRange { index, len } => Self::OutOfRange { index, len },
            BombError::InvalidLoadout { .. } => Self::LoadFailure { reason: err.to_string() },
            other => Self::InvalidEvent { reason: other.to_string() },
        }
    }
}

impl From<ContextError> for AppError {
    fn from(err: ContextError) -> Self {
        Self::InvalidEvent { reason: err.to_string() }
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        Self::LoadFailure { reason: err.to_string() }
    }
}
