//! Menu screens
//!
//! Main menu, campaign sections and missions, free-play presets and editor,
//! and the loading screen.

use defuse_app::{AppState, CUSTOM_ENTRY, InputState, MAIN_MENU, SessionSnapshot};
use defuse_core::{FreePlayConfig, FreePlayField, QuickPreset};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::clock_text;

const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";

/// Render the menu screen for the snapshot's state.
pub fn render(frame: &mut Frame, snapshot: &SessionSnapshot, input: &InputState, area: Rect) {
    match snapshot.state {
        AppState::MainMenu => {
            let items = MAIN_MENU.iter().map(ToString::to_string).collect();
            render_list(frame, " Main menu ", items, input.cursor(), area);
        },
        AppState::SectionSelect => {
            let items = input
                .catalog()
                .sections()
                .iter()
                .map(|section| format!("{:<12}{}", section.id.to_string(), section.name))
                .collect();
            render_list(frame, " Campaign ", items, input.cursor(), area);
        },
        AppState::MissionSelect => {
            let items = input
                .missions(&snapshot.context)
                .iter()
                .map(|mission| {
                    format!(
                        "{:<32}{} modules  {}  {} strikes",
                        mission.name,
                        mission.modules.len(),
                        clock_text(mission.time_budget()),
                        mission.strike_limit
                    )
                })
                .collect();
            let title = snapshot
                .context
                .section()
                .map_or_else(|| " Missions ".to_string(), |id| format!(" Missions: {id} "));
            render_list(frame, &title, items, input.cursor(), area);
        },
        AppState::FreePlayMenu => {
            let mut items: Vec<String> = QuickPreset::ALL
                .iter()
                .map(|&preset| {
                    format!("{preset:<10}{}", describe(&FreePlayConfig::preset(preset, 0)))
                })
                .collect();
            items.push(CUSTOM_ENTRY.to_string());
            render_list(frame, " Free play ", items, input.cursor(), area);
        },
        AppState::FreePlayAdvanced => render_editor(frame, input, area),
        AppState::Loading => render_loading(frame, snapshot, area),
        _ => {},
    }
}

fn describe(config: &FreePlayConfig) -> String {
    format!(
        "{} modules  {}  {} strikes",
        config.module_count,
        clock_text(config.time_budget),
        config.strike_limit
    )
}

fn render_list(frame: &mut Frame, title: &str, items: Vec<String>, cursor: usize, area: Rect) {
    let items: Vec<ListItem> = items
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            let (prefix, style) = if i == cursor {
                (SELECTED_PREFIX, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                (UNSELECTED_PREFIX, Style::default())
            };
            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(format!("{}. {label}", i + 1), style),
            ]))
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    frame.render_widget(List::new(items).block(block), area);
}

fn render_editor(frame: &mut Frame, input: &InputState, area: Rect) {
    let draft = input.draft();
    let lines: Vec<Line> = FreePlayField::ALL
        .iter()
        .map(|&field| {
            let (name, value) = match field {
                FreePlayField::Modules => ("Modules", draft.module_count.to_string()),
                FreePlayField::Time => ("Time", clock_text(draft.time_budget)),
                FreePlayField::Strikes => ("Strikes", draft.strike_limit.to_string()),
            };
            let style = if field == input.field() {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(if field == input.field() { SELECTED_PREFIX } else { UNSELECTED_PREFIX }),
                Span::styled(format!("{name:<10}< {value} >"), style),
            ])
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Custom bomb ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_loading(frame: &mut Frame, snapshot: &SessionSnapshot, area: Rect) {
    let text = match &snapshot.status_message {
        Some(message) => vec![
            Line::styled(message.clone(), Style::default().fg(Color::Red)),
            Line::raw(""),
            Line::raw("[r] retry  [esc] back to menu"),
        ],
        None => vec![Line::raw("Arming the bomb...")],
    };

    let block = Block::default().borders(Borders::ALL).title(" Loading ");
    frame.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), area);
}
