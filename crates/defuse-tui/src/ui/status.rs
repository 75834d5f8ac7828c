//! Status bar
//!
//! Displays the active screen, the last error or notice, and key hints.

use defuse_app::{AppState, SessionSnapshot};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let keys = match snapshot.state {
        AppState::MainMenu => "enter select  q quit",
        AppState::BombSelection => "1-9 open module  enter open",
        AppState::BombView => "enter retry module  esc overview",
        AppState::ModuleActive => "1-9 answer  enter answer  esc back",
        AppState::FreePlayAdvanced => "left/right adjust  enter start  esc back",
        AppState::Loading => "r retry  esc cancel",
        AppState::GameOver => "r menu  q quit",
        AppState::SectionSelect | AppState::MissionSelect | AppState::FreePlayMenu => {
            "enter select  esc back"
        },
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", snapshot.state),
        Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if let Some(message) = &snapshot.status_message {
        spans.push(Span::styled(format!(" {message} "), Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::styled(format!(" {keys}"), Style::default().fg(Color::Gray)));

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
