//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. Time comes from the system
//! clock; a tick is produced at least once per tick period.

use std::{
    io::{self, Stdout, stdout},
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use defuse_app::{App, Driver, DriverInput, InputState, KeyInput};
use defuse_core::{Clock, SystemClock};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm) and rendering (ratatui). Owns the input
/// state for menu navigation.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    input_state: InputState,
    clock: SystemClock,
    tick: Duration,
}

impl TerminalDriver {
    /// Take over the terminal.
    ///
    /// `tick` is the longest time [`Driver::poll_input`] waits for a key.
    pub fn new(input_state: InputState, tick: Duration) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, input_state, clock: SystemClock::new(), tick })
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            _ => None,
        }
    }

    /// Ctrl-C always quits; other keys go through the input state.
    fn handle_key(input_state: &mut InputState, key: KeyEvent, app: &App) -> DriverInput {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return DriverInput::Quit;
        }
        match Self::convert_key(key.code) {
            Some(key_input) => input_state.handle_key(key_input, app),
            None => DriverInput::Idle,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;
    type Instant = Instant;

    async fn poll_input(&mut self, app: &App) -> Result<DriverInput, Self::Error> {
        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        Ok(Self::handle_key(&mut self.input_state, key_event, app))
                    },
                    Some(Ok(Event::Resize(..))) => Ok(DriverInput::Redraw),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    None => Ok(DriverInput::Quit),
                    _ => Ok(DriverInput::Idle),
                }
            }

            // Tick timeout
            () = tokio::time::sleep(self.tick) => Ok(DriverInput::Idle),
        }
    }

    fn now(&self) -> Self::Instant {
        self.clock.now()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.input_state.sync(app);
        let snapshot = app.snapshot();
        self.terminal.draw(|frame| {
            ui::render(frame, &snapshot, &self.input_state);
        })?;
        Ok(())
    }

    fn stop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
