//! UI rendering
//!
//! Rendering functions that convert a [`SessionSnapshot`] into terminal
//! output using ratatui widgets. All functions are pure (no I/O): they read
//! the snapshot and the input cursors and draw into the frame.

mod bomb;
mod menu;
mod module;
mod status;

use std::time::Duration;

use defuse_app::{AppState, InputState, SessionSnapshot};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// Render the entire UI.
pub fn render(frame: &mut Frame, snapshot: &SessionSnapshot, input: &InputState) {
    const HEADER_HEIGHT: u16 = 3;
    const MAIN_AREA_MIN_HEIGHT: u16 = 5;
    const STATUS_HEIGHT: u16 = 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(MAIN_AREA_MIN_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(frame.area());

    let [header_area, main_area, status_area] = chunks.as_ref() else {
        return;
    };

    bomb::render_header(frame, snapshot, *header_area);
    match snapshot.state {
        AppState::MainMenu
        | AppState::SectionSelect
        | AppState::MissionSelect
        | AppState::FreePlayMenu
        | AppState::FreePlayAdvanced
        | AppState::Loading => menu::render(frame, snapshot, input, *main_area),
        AppState::BombSelection | AppState::BombView => {
            bomb::render(frame, snapshot, input, *main_area);
        },
        AppState::ModuleActive => module::render(frame, snapshot, input, *main_area),
        AppState::GameOver => bomb::render_summary(frame, snapshot, *main_area),
    }
    status::render(frame, snapshot, *status_area);
}

/// Countdown text, `M:SS`.
fn clock_text(time: Duration) -> String {
    let secs = time.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
