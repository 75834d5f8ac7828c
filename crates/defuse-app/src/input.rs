//! Terminal-agnostic keyboard input and menu navigation.
//!
//! [`InputState`] owns everything the player manipulates before an event is
//! sent: the highlighted entry of the current screen, the free-play draft
//! being edited, and the seed for the next free-play bomb. It turns
//! [`KeyInput`] into [`DriverInput`] by reading the App, never by mutating it.

use defuse_core::{
    Catalog, FreePlayConfig, FreePlayField, Mission, QuickPreset, SessionContext,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{App, AppEvent, AppState, DriverInput};

/// Keyboard input abstraction.
///
/// Decouples application logic from terminal libraries (crossterm, termion,
/// etc.) enabling deterministic tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Escape key.
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
}

/// Main menu entries.
pub const MAIN_MENU: [&str; 3] = ["Campaign", "Free play", "Quit"];

/// Label of the free-play entry that opens the editor.
pub const CUSTOM_ENTRY: &str = "Custom...";

/// Cursor and draft state of the menus.
#[derive(Debug, Clone)]
pub struct InputState {
    catalog: Catalog,
    /// Screen the cursor belongs to.
    screen: AppState,
    /// Highlighted entry on `screen`.
    cursor: usize,
    /// Free-play parameters in the editor.
    draft: FreePlayConfig,
    /// Source of free-play bomb seeds.
    rng: ChaCha8Rng,
}

impl InputState {
    /// Create input state over `catalog`, seeding free play from `seed`.
    pub fn new(catalog: Catalog, seed: u64) -> Self {
        Self {
            catalog,
            screen: AppState::MainMenu,
            cursor: 0,
            draft: FreePlayConfig::preset(QuickPreset::Normal, seed),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Catalog the menus list.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Highlighted entry of the current screen.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Free-play parameters in the editor.
    pub fn draft(&self) -> &FreePlayConfig {
        &self.draft
    }

    /// Field highlighted in the free-play editor.
    pub fn field(&self) -> FreePlayField {
        FreePlayField::ALL[self.cursor.min(FreePlayField::ALL.len() - 1)]
    }

    /// Missions of the section recorded in `context`.
    pub fn missions(&self, context: &SessionContext) -> &[Mission] {
        context
            .section()
            .and_then(|id| self.catalog.section(id))
            .map(|section| section.missions.as_slice())
            .unwrap_or_default()
    }

    /// Number of selectable entries on the App's current screen.
    pub fn entries(&self, app: &App) -> usize {
        match app.state() {
            AppState::MainMenu => MAIN_MENU.len(),
            AppState::SectionSelect => self.catalog.sections().len(),
            AppState::MissionSelect => self.missions(app.context()).len(),
            AppState::FreePlayMenu => QuickPreset::ALL.len() + 1,
            AppState::FreePlayAdvanced => FreePlayField::ALL.len(),
            AppState::BombSelection | AppState::BombView => {
                app.bomb().map_or(0, |bomb| bomb.module_count())
            },
            AppState::ModuleActive => {
                app.addressed_module().map_or(0, |module| module.display().choices.len())
            },
            AppState::Loading | AppState::GameOver => 0,
        }
    }

    /// Follow the App to its current screen.
    ///
    /// Entering a screen resets the cursor; the bomb screens start on the
    /// last addressed module.
    pub fn sync(&mut self, app: &App) {
        if app.state() != self.screen {
            self.screen = app.state();
            self.cursor = match self.screen {
                AppState::BombSelection | AppState::BombView => app.addressed().unwrap_or(0),
                _ => 0,
            };
        }
        self.cursor = self.cursor.min(self.entries(app).saturating_sub(1));
    }

    /// Handle a key input event.
    pub fn handle_key(&mut self, key: KeyInput, app: &App) -> DriverInput {
        self.sync(app);
        let state = app.state();

        match key {
            KeyInput::Char('q') => DriverInput::Quit,
            KeyInput::Up | KeyInput::Char('k') => self.move_cursor(app, false),
            KeyInput::Down | KeyInput::Char('j') => self.move_cursor(app, true),
            KeyInput::Left | KeyInput::Right if state == AppState::FreePlayAdvanced => {
                let field = self.field();
                self.draft.step(field, key == KeyInput::Right);
                DriverInput::Redraw
            },
            KeyInput::Left => self.move_cursor(app, false),
            KeyInput::Right => self.move_cursor(app, true),
            KeyInput::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if index >= self.entries(app) {
                    return DriverInput::Idle;
                }
                self.cursor = index;
                self.activate(app)
            },
            KeyInput::Char('r') if matches!(state, AppState::Loading | AppState::GameOver) => {
                self.activate(app)
            },
            KeyInput::Char(_) => DriverInput::Idle,
            KeyInput::Enter => self.activate(app),
            KeyInput::Esc | KeyInput::Backspace => match state {
                AppState::MainMenu | AppState::GameOver => DriverInput::Quit,
                AppState::Loading => DriverInput::Event(AppEvent::Cancel),
                // No way out of an armed bomb but defusing it.
                AppState::BombSelection => DriverInput::Idle,
                _ => DriverInput::Event(AppEvent::Back),
            },
        }
    }

    fn move_cursor(&mut self, app: &App, down: bool) -> DriverInput {
        let last = self.entries(app).saturating_sub(1);
        self.cursor =
            if down { (self.cursor + 1).min(last) } else { self.cursor.saturating_sub(1) };
        DriverInput::Redraw
    }

    /// Event for the highlighted entry of the current screen.
    fn activate(&mut self, app: &App) -> DriverInput {
        let event = match app.state() {
            AppState::MainMenu => match self.cursor {
                0 => AppEvent::SelectCampaign,
                1 => AppEvent::SelectFreePlay,
                _ => return DriverInput::Quit,
            },
            AppState::SectionSelect => match self.catalog.sections().get(self.cursor) {
                Some(section) => AppEvent::ChooseSection(section.id),
                None => return DriverInput::Idle,
            },
            AppState::MissionSelect => match self.missions(app.context()).get(self.cursor) {
                Some(mission) => AppEvent::ChooseMission(mission.id.clone()),
                None => return DriverInput::Idle,
            },
            AppState::FreePlayMenu => match QuickPreset::ALL.get(self.cursor) {
                Some(&preset) => {
                    AppEvent::ChooseQuickConfig(FreePlayConfig::preset(preset, self.next_seed()))
                },
                None => AppEvent::OpenAdvanced,
            },
            AppState::FreePlayAdvanced => {
                let seed = self.next_seed();
                AppEvent::ConfirmConfig(FreePlayConfig { seed, ..self.draft })
            },
            AppState::Loading => AppEvent::ConfigBuilt,
            AppState::BombSelection | AppState::BombView => AppEvent::SelectModule(self.cursor),
            AppState::ModuleActive => {
                let choice = app
                    .addressed_module()
                    .and_then(|module| module.display().choices.get(self.cursor).cloned());
                match choice {
                    Some(choice) => AppEvent::SubmitAnswer(choice.input),
                    None => return DriverInput::Idle,
                }
            },
            AppState::GameOver => AppEvent::Reset,
        };
        DriverInput::Event(event)
    }

    /// Draw the seed of the next free-play bomb.
    fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}
