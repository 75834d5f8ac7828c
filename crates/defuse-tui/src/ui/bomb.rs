//! Bomb screens
//!
//! Countdown header, module overview, and the end-of-session summary.

use std::time::Duration;

use defuse_app::{AppState, InputState, SessionResult, SessionSnapshot};
use defuse_core::{LossCause, ModuleStatus, SubmitOutcome};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::clock_text;

/// Remaining time below which the countdown turns red.
const URGENT: Duration = Duration::from_secs(30);

/// Render the header: countdown and counters, or the title before a bomb.
pub fn render_header(frame: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let line = match &snapshot.bomb {
        Some(bomb) => {
            let clock_style = if bomb.remaining < URGENT {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            };
            let solved = bomb.modules.iter().filter(|m| m.status == ModuleStatus::Solved).count();
            Line::from(vec![
                Span::styled(clock_text(bomb.remaining), clock_style),
                Span::raw(format!("   Strikes {}/{}", bomb.strikes, bomb.strike_limit)),
                Span::raw(format!("   Solved {solved}/{}", bomb.modules.len())),
            ])
        },
        None => Line::styled("DEFUSE", Style::default().add_modifier(Modifier::BOLD)),
    };

    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the module overview.
pub fn render(frame: &mut Frame, snapshot: &SessionSnapshot, input: &InputState, area: Rect) {
    let Some(bomb) = &snapshot.bomb else {
        return;
    };

    let items: Vec<ListItem> = bomb
        .modules
        .iter()
        .enumerate()
        .map(|(i, module)| {
            let (mark, mark_style) = match module.status {
                ModuleStatus::Solved => ("solved", Style::default().fg(Color::Green)),
                ModuleStatus::Failed => ("failed", Style::default().fg(Color::Red)),
                ModuleStatus::Unsolved => ("", Style::default()),
            };
            let style = if i == input.cursor() {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] {:<14}", i + 1, module.kind.to_string()), style),
                Span::styled(mark, mark_style),
            ]))
        })
        .collect();

    let title = match (snapshot.state, snapshot.last_outcome) {
        (AppState::BombView, Some(SubmitOutcome::Solved)) => " Module solved ",
        (AppState::BombView, Some(SubmitOutcome::Failed)) => " Strike! ",
        (AppState::BombView, Some(SubmitOutcome::StillUnsolved)) => " Correct, keep going ",
        _ => " Modules ",
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    frame.render_widget(List::new(items).block(block), area);
}

/// Render the end-of-session summary.
pub fn render_summary(frame: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let Some(summary) = &snapshot.summary else {
        return;
    };

    let headline = match summary.result {
        SessionResult::Win => Line::styled(
            "BOMB DEFUSED",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        SessionResult::Loss(cause) => {
            let why = match cause {
                LossCause::TimeExpired => "time ran out",
                LossCause::StrikeLimit => "too many strikes",
            };
            Line::styled(
                format!("BOMB EXPLODED ({why})"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        },
    };

    let lines = vec![
        headline,
        Line::raw(""),
        Line::raw(format!("Time spent    {}", clock_text(summary.elapsed))),
        Line::raw(format!("Strikes       {}/{}", summary.strikes, summary.strike_limit)),
        Line::raw(format!("Modules       {}/{}", summary.solved, summary.total)),
        Line::raw(""),
        Line::raw("[r] main menu  [q] quit"),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Game over ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
