//! Application layer for the defusal trainer
//!
//! Pure session state machine and generic runtime, enabling deterministic
//! testing with the same code that runs in the terminal.
//!
//! # Components
//!
//! - [`App`]: session state machine (screens, context, bomb, result)
//! - [`InputState`]: key mapping and menu cursors
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]

mod action;
mod app;
mod driver;
mod error;
mod event;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use driver::{Driver, DriverInput};
pub use error::AppError;
pub use event::AppEvent;
pub use input::{CUSTOM_ENTRY, InputState, KeyInput, MAIN_MENU};
pub use runtime::Runtime;
pub use state::{AppState, SessionResult, SessionSnapshot, SessionSummary};
