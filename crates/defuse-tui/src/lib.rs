//! Terminal UI for the defusal trainer
//!
//! A thin shell over [`defuse_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`defuse_app::Runtime`].
//!
//! This crate only handles key decoding and terminal rendering.

#![forbid(unsafe_code)]

pub mod terminal;
pub mod ui;

pub use defuse_app::{App, AppEvent, Driver, InputState, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
