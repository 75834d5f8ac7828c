//! Session state machine.
//!
//! [`App`] owns the active screen, the menu selections of the current
//! session and, once loading completes, the armed bomb. It is a pure state
//! machine: it consumes [`crate::AppEvent`] inputs and produces
//! [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Enforces the screen transition table; anything else is rejected with
//!   [`AppError::InvalidTransition`] and changes nothing.
//! - Fills and freezes the [`SessionContext`], then hands it to the
//!   [`MissionLoader`] to build the bomb.
//! - Forwards ticks to the bomb and ends the session once it is terminal.
//! - Keeps a transient status line with the last error or notice.

use std::{fmt, time::Duration};

use defuse_core::{
    BombModel, BombStatus, MissionLoader, Mode, ModulePuzzle, PuzzleInput, SessionContext,
    SubmitOutcome,
};

use crate::{
    AppAction, AppError, AppEvent, AppState, SessionResult, SessionSnapshot, SessionSummary,
};

/// Session state machine.
///
/// Processes events and produces actions. No I/O dependencies: the loader is
/// the only collaborator and it is injected at construction.
pub struct App {
    /// Active screen.
    state: AppState,
    /// Menu selections of the current session.
    context: SessionContext,
    /// Armed bomb. `None` outside the bomb screens and GameOver.
    bomb: Option<BombModel>,
    /// Last addressed module. `None` until one is selected.
    addressed: Option<usize>,
    /// Outcome of the last answer.
    last_outcome: Option<SubmitOutcome>,
    /// Set when entering GameOver.
    summary: Option<SessionSummary>,
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
    /// Builds bombs from frozen contexts.
    loader: Box<dyn MissionLoader>,
}

impl App {
    /// Create an App at the main menu with an empty session context.
    ///
    /// Bombs use the default [`defuse_core::Precedence`]. Explosion and
    /// defusal never coincide here: answers and ticks reach the bomb as
    /// separate events, so the last solve always recomputes alone.
    pub fn new(loader: Box<dyn MissionLoader>) -> Self {
        Self {
            state: AppState::MainMenu,
            context: SessionContext::new(),
            bomb: None,
            addressed: None,
            last_outcome: None,
            summary: None,
            status_message: None,
            loader,
        }
    }

    /// Process an event and return actions.
    ///
    /// # Errors
    ///
    /// Any [`AppError`]; the App is left exactly as it was, apart from the
    /// status line which then shows the error.
    pub fn handle(&mut self, event: AppEvent) -> Result<Vec<AppAction>, AppError> {
        let from = self.state;
        let name = event.name();

        match self.transition(event) {
            Ok(actions) => {
                if self.state != from {
                    tracing::debug!(%from, to = %self.state, event = name, "transition");
                }
                Ok(actions)
            },
            Err(err) => {
                tracing::warn!(state = %from, event = name, error = %err, "event rejected");
                self.status_message = Some(err.to_string());
                Err(err)
            },
        }
    }

    fn transition(&mut self, event: AppEvent) -> Result<Vec<AppAction>, AppError> {
        use AppState as S;

        match (self.state, event) {
            (_, AppEvent::Tick(elapsed)) => Ok(self.tick(elapsed)),

            (S::MainMenu, AppEvent::SelectCampaign) => {
                self.start_session(Mode::Campaign, S::SectionSelect)
            },
            (S::MainMenu, AppEvent::SelectFreePlay) => {
                self.start_session(Mode::FreePlay, S::FreePlayMenu)
            },

            (S::SectionSelect, AppEvent::ChooseSection(section)) => {
                self.context.set_section(section)?;
                Ok(self.enter(S::MissionSelect))
            },
            (S::SectionSelect | S::FreePlayMenu, AppEvent::Back)
            | (S::Loading, AppEvent::Cancel)
            | (S::GameOver, AppEvent::Reset) => Ok(self.return_to_menu()),

            (S::MissionSelect, AppEvent::ChooseMission(mission)) => {
                self.context.set_mission(mission)?;
                Ok(self.begin_loading())
            },
            (S::MissionSelect, AppEvent::Back) => {
                self.context.clear_section()?;
                Ok(self.enter(S::SectionSelect))
            },

            (S::FreePlayMenu, AppEvent::ChooseQuickConfig(config))
            | (S::FreePlayAdvanced, AppEvent::ConfirmConfig(config)) => {
                self.context.set_free_play(config)?;
                Ok(self.begin_loading())
            },
            (S::FreePlayMenu, AppEvent::OpenAdvanced) => Ok(self.enter(S::FreePlayAdvanced)),
            (S::FreePlayAdvanced, AppEvent::Back) => Ok(self.enter(S::FreePlayMenu)),

            (S::Loading, AppEvent::ConfigBuilt) => self.arm_bomb(),

            (S::BombSelection | S::BombView, AppEvent::SelectModule(index))
                if !self.bomb_is_terminal() =>
            {
                self.address(index)
            },
            (S::ModuleActive, AppEvent::SubmitAnswer(input)) => self.submit(input),
            (S::ModuleActive | S::BombView, AppEvent::Back) => Ok(self.enter(S::BombSelection)),

            (state, event) => Err(AppError::InvalidTransition { state, event: event.name() }),
        }
    }

    /// Switch screens. Clears the status line.
    fn enter(&mut self, state: AppState) -> Vec<AppAction> {
        self.state = state;
        self.status_message = None;
        vec![AppAction::Render]
    }

    fn start_session(&mut self, mode: Mode, next: AppState) -> Result<Vec<AppAction>, AppError> {
        let mut context = SessionContext::new();
        context.set_mode(mode)?;
        self.context = context;
        Ok(self.enter(next))
    }

    fn return_to_menu(&mut self) -> Vec<AppAction> {
        self.context = SessionContext::new();
        self.bomb = None;
        self.addressed = None;
        self.last_outcome = None;
        self.summary = None;
        self.enter(AppState::MainMenu)
    }

    fn begin_loading(&mut self) -> Vec<AppAction> {
        self.context.freeze();
        let mut actions = self.enter(AppState::Loading);
        actions.push(AppAction::BuildBomb);
        actions
    }

    fn arm_bomb(&mut self) -> Result<Vec<AppAction>, AppError> {
        let loadout = self.loader.load(&self.context)?;
        let bomb = BombModel::new(loadout)?;
        tracing::info!(
            modules = bomb.module_count(),
            time = ?bomb.remaining(),
            strike_limit = bomb.strike_limit(),
            "bomb armed"
        );

        self.bomb = Some(bomb);
        self.addressed = None;
        self.last_outcome = None;
        let mut actions = vec![AppAction::StartClock];
        actions.extend(self.enter(AppState::BombSelection));
        Ok(actions)
    }

    fn address(&mut self, index: usize) -> Result<Vec<AppAction>, AppError> {
        self.armed()?.addressed_module(index)?;
        self.addressed = Some(index);
        Ok(self.enter(AppState::ModuleActive))
    }

    fn submit(&mut self, input: PuzzleInput) -> Result<Vec<AppAction>, AppError> {
        let index = self
            .addressed
            .ok_or_else(|| AppError::InvalidEvent { reason: "no module addressed".into() })?;
        let bomb = self.armed_mut()?;
        let outcome = bomb.submit(index, input)?;
        let notice = match outcome {
            SubmitOutcome::Solved => Some(format!("Module {} solved", index + 1)),
            SubmitOutcome::Failed => {
                Some(format!("Strike! {}/{}", bomb.strikes(), bomb.strike_limit()))
            },
            SubmitOutcome::StillUnsolved => None,
        };

        self.last_outcome = Some(outcome);
        let actions = self.enter(AppState::BombView);
        self.status_message = notice;
        Ok(actions)
    }

    fn tick(&mut self, elapsed: Duration) -> Vec<AppAction> {
        if !self.state.has_bomb() {
            return Vec::new();
        }
        let Some(bomb) = self.bomb.as_mut() else {
            return Vec::new();
        };

        let before = bomb.remaining();
        if bomb.tick(elapsed) == BombStatus::Arming {
            return if bomb.remaining() == before { Vec::new() } else { vec![AppAction::Render] };
        }

        let result = bomb.loss_cause().map_or(SessionResult::Win, SessionResult::Loss);
        let summary = SessionSummary {
            result,
            strikes: bomb.strikes(),
            strike_limit: bomb.strike_limit(),
            elapsed: bomb.elapsed(),
            solved: bomb.solved_count(),
            total: bomb.module_count(),
        };
        tracing::info!(
            ?result,
            strikes = summary.strikes,
            elapsed = ?summary.elapsed,
            solved = summary.solved,
            total = summary.total,
            "session ended"
        );

        self.summary = Some(summary);
        let mut actions = vec![AppAction::SessionEnded { result }];
        actions.extend(self.enter(AppState::GameOver));
        actions
    }

    /// A defused or exploded bomb only waits for the tick that ends the
    /// session.
    fn bomb_is_terminal(&self) -> bool {
        self.bomb.as_ref().is_some_and(|bomb| bomb.status().is_terminal())
    }

    fn armed(&self) -> Result<&BombModel, AppError> {
        self.bomb.as_ref().ok_or_else(no_bomb)
    }

    fn armed_mut(&mut self) -> Result<&mut BombModel, AppError> {
        self.bomb.as_mut().ok_or_else(no_bomb)
    }

    /// Active screen.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Menu selections of the current session.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Armed bomb. `None` before loading completes.
    pub fn bomb(&self) -> Option<&BombModel> {
        self.bomb.as_ref()
    }

    /// Index of the last addressed module. `None` until one is selected.
    pub fn addressed(&self) -> Option<usize> {
        self.addressed
    }

    /// The last addressed module. `None` until one is selected.
    pub fn addressed_module(&self) -> Option<&dyn ModulePuzzle> {
        let index = self.addressed?;
        self.bomb.as_ref()?.addressed_module(index).ok()
    }

    /// Outcome of the last answer. `None` until one is submitted.
    pub fn last_outcome(&self) -> Option<SubmitOutcome> {
        self.last_outcome
    }

    /// Session summary. `None` until GameOver.
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Owned, consistent copy of everything a renderer needs.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            context: self.context.clone(),
            bomb: self.bomb.as_ref().map(BombModel::view),
            addressed: self.addressed,
            last_outcome: self.last_outcome,
            summary: self.summary,
            status_message: self.status_message.clone(),
        }
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("state", &self.state)
            .field("context", &self.context)
            .field("bomb", &self.bomb)
            .field("addressed", &self.addressed)
            .field("summary", &self.summary)
            .field("status_message", &self.status_message)
            .finish_non_exhaustive()
    }
}

fn no_bomb() -> AppError {
    AppError::InvalidEvent { reason: "no bomb is armed".into() }
}
