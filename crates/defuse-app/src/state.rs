//! Observable application state types.
//!
//! [`AppState`] names the active screen. [`SessionSnapshot`] is the owned,
//! consistent copy of everything a renderer needs, taken between events so
//! drawing never observes a half-applied transition.

use std::{fmt, time::Duration};

use defuse_core::{BombView, LossCause, SessionContext, SubmitOutcome};

/// Active screen of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppState {
    /// Campaign / free play / quit.
    MainMenu,
    /// Campaign section list.
    SectionSelect,
    /// Missions of the chosen section.
    MissionSelect,
    /// Quick free-play presets.
    FreePlayMenu,
    /// Free-play parameter editor.
    FreePlayAdvanced,
    /// Context frozen, bomb being built.
    Loading,
    /// Bomb overview, choosing a module.
    BombSelection,
    /// Bomb overview after an answer.
    BombView,
    /// Interacting with the addressed module.
    ModuleActive,
    /// Session finished.
    GameOver,
}

impl AppState {
    /// Returns true in the states where a bomb is armed and ticking.
    pub fn has_bomb(self) -> bool {
        matches!(self, Self::BombSelection | Self::BombView | Self::ModuleActive)
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MainMenu => "main menu",
            Self::SectionSelect => "section select",
            Self::MissionSelect => "mission select",
            Self::FreePlayMenu => "free play menu",
            Self::FreePlayAdvanced => "free play editor",
            Self::Loading => "loading",
            Self::BombSelection => "bomb selection",
            Self::BombView => "bomb view",
            Self::ModuleActive => "module",
            Self::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionResult {
    /// Bomb defused.
    Win,
    /// Bomb exploded.
    Loss(LossCause),
}

/// Final numbers of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// How the session ended.
    pub result: SessionResult,
    /// Strikes recorded.
    pub strikes: u32,
    /// Strike limit of the bomb.
    pub strike_limit: u32,
    /// Time spent on the bomb.
    pub elapsed: Duration,
    /// Modules solved.
    pub solved: usize,
    /// Modules on the bomb.
    pub total: usize,
}

/// Owned copy of the App for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Active screen.
    pub state: AppState,
    /// Menu selections of this session.
    pub context: SessionContext,
    /// Bomb view. `None` before loading completes.
    pub bomb: Option<BombView>,
    /// Last addressed module. `None` until one is selected.
    pub addressed: Option<usize>,
    /// Outcome of the last answer. `None` until one is submitted.
    pub last_outcome: Option<SubmitOutcome>,
    /// Session summary. `None` until GameOver.
    pub summary: Option<SessionSummary>,
    /// Last error or notice. `None` if nothing to report.
    pub status_message: Option<String>,
}
