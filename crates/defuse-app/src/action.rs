//! Application side-effects and intents.
//!
//! [`AppAction`] values are instructions produced by the [`crate::App`]
//! state machine for the runtime to execute.

use crate::SessionResult;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// The context is frozen; build the bomb by dispatching
    /// [`AppEvent::ConfigBuilt`](crate::AppEvent::ConfigBuilt).
    BuildBomb,

    /// A bomb was armed; restart tick measurement from now.
    StartClock,

    /// The session reached GameOver.
    SessionEnded {
        /// How it ended.
        result: SessionResult,
    },
}
