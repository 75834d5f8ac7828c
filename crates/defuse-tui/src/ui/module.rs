//! Module screen
//!
//! Shows the addressed module's display state: description lines, numbered
//! choices, and the rule hint.

use defuse_app::{InputState, SessionSnapshot};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Render the addressed module.
pub fn render(frame: &mut Frame, snapshot: &SessionSnapshot, input: &InputState, area: Rect) {
    const HINT_HEIGHT: u16 = 4;

    let Some(module) = snapshot
        .addressed
        .and_then(|index| snapshot.bomb.as_ref()?.modules.get(index))
    else {
        return;
    };
    let display = &module.display;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(HINT_HEIGHT)])
        .split(area);
    let [body_area, hint_area] = chunks.as_ref() else {
        return;
    };

    let mut items: Vec<ListItem> =
        display.lines.iter().map(|line| ListItem::new(line.clone())).collect();
    items.push(ListItem::new(""));
    items.extend(display.choices.iter().enumerate().map(|(i, choice)| {
        let style = if choice.spent {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
        } else if i == input.cursor() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        ListItem::new(Line::from(vec![
            Span::raw(if i == input.cursor() { "> " } else { "  " }),
            Span::styled(format!("{}. {}", i + 1, choice.label), style),
        ]))
    }));

    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", display.title));
    frame.render_widget(List::new(items).block(block), *body_area);

    if let Some(hint) = &display.hint {
        let hint = Paragraph::new(format!("Rule: {hint}"))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan))
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, *hint_area);
    }
}
