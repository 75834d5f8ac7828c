//! Core runtime of the defusal trainer
//!
//! Pure, I/O-free building blocks the session state machine drives: the
//! countdown clock, the puzzle module contract and its variants, the bomb
//! model, the menu session context, and the mission catalog.
//!
//! # Components
//!
//! - [`Clock`]: monotonic time source (real or virtual)
//! - [`ModulePuzzle`]: contract every puzzle variant implements
//! - [`BombModel`]: modules, strikes, countdown, derived status
//! - [`SessionContext`]: menu selections, frozen at load time
//! - [`MissionLoader`]: factory turning a frozen context into a [`Loadout`]

#![forbid(unsafe_code)]

mod bomb;
mod catalog;
mod clock;
mod error;
mod puzzle;
mod session;

pub use bomb::{
    BombModel, BombStatus, BombView, Loadout, LossCause, ModuleView, Precedence, resolve_status,
};
pub use catalog::{
    Catalog, CatalogError, CatalogLoader, CatalogSection, LoadError, Mission, MissionLoader,
};
pub use clock::{Clock, ManualClock, SystemClock, VirtualInstant};
pub use error::{BombError, PuzzleError};
pub use puzzle::{
    Choice, Keypad, ModuleDisplay, ModuleKind, ModulePuzzle, ModuleStatus, PuzzleInput,
    SimonColor, SimonSays, SubmitOutcome, WireColor, Wires,
};
pub use session::{
    ContextError, FreePlayConfig, FreePlayField, MissionId, Mode, QuickPreset, SectionId,
    SessionContext, Selection,
};
