//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific input, time and rendering, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::{future::Future, ops::Sub, time::Duration};

use crate::{App, AppEvent};

/// What one poll of the input source produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverInput {
    /// Player input for the state machine.
    Event(AppEvent),
    /// Leave the program.
    Quit,
    /// Redraw without changing state (cursor moved, terminal resized).
    Redraw,
    /// Nothing happened before the tick period elapsed.
    Idle,
}

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal and in tests.
///
/// # Implementations
///
/// - **TUI**: crossterm for keyboard events, ratatui for drawing
/// - **Tests**: scripted inputs over a manual clock
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): Platform-specific error type
/// - [`Instant`](Driver::Instant): Time representation (real or virtual)
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in tests.
    type Instant: Copy + Ord + Send + Sync + Sub<Output = Duration>;

    /// Wait for the next input, at most one tick period.
    ///
    /// Returns [`DriverInput::Idle`] when the period elapses without input
    /// so the runtime keeps ticking.
    fn poll_input(
        &mut self,
        app: &App,
    ) -> impl Future<Output = Result<DriverInput, Self::Error>> + Send;

    /// Current time instant.
    fn now(&self) -> Self::Instant;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release terminal or other resources.
    fn stop(&mut self);
}
