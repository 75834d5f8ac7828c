//! Puzzle module contract and the built-in variants.
//!
//! Every module on a bomb implements [`ModulePuzzle`]. The bomb and the state
//! machine only ever talk to this trait, so a new puzzle type needs no change
//! outside this module tree.
//!
//! A module never references its bomb. It answers each submission with a
//! [`SubmitOutcome`]; the bomb turns `Failed` into a strike and `Solved` into
//! progress towards defusal.

mod keypad;
mod simon;
mod wires;

use std::fmt;

pub use keypad::Keypad;
use rand::Rng;
use serde::{Deserialize, Serialize};
pub use simon::{SimonColor, SimonSays};
pub use wires::{WireColor, Wires};

use crate::PuzzleError;

/// Per-module status tracked by the bomb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleStatus {
    /// Not solved yet; accepts input.
    Unsolved,
    /// Solved. Terminal for this module.
    Solved,
    /// A wrong answer was just given. Transient: the bomb records the strike
    /// and resets the module to `Unsolved`.
    Failed,
}

/// Result of one submission to a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Correct partial answer, more input needed.
    StillUnsolved,
    /// The module is solved.
    Solved,
    /// Wrong answer, counts as a strike.
    Failed,
}

/// Answer payload routed to the addressed module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PuzzleInput {
    /// Cut the wire at this position.
    Cut(usize),
    /// Press the button at this position.
    Press(usize),
    /// Press a coloured pad.
    Color(SimonColor),
}

impl PuzzleInput {
    /// Short name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cut(_) => "cut",
            Self::Press(_) => "press",
            Self::Color(_) => "color",
        }
    }
}

/// Module variants known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    /// Cut the right wire.
    Wires,
    /// Press four symbols in order.
    Keypad,
    /// Repeat translated colour sequences.
    SimonSays,
}

impl ModuleKind {
    /// Every variant, in catalog order.
    pub const ALL: [Self; 3] = [Self::Wires, Self::Keypad, Self::SimonSays];

    /// Generate a fresh module of this kind.
    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> Box<dyn ModulePuzzle> {
        match self {
            Self::Wires => Box::new(Wires::generate(rng)),
            Self::Keypad => Box::new(Keypad::generate(rng)),
            Self::SimonSays => Box::new(SimonSays::generate(rng)),
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Wires => "Wires",
            Self::Keypad => "Keypad",
            Self::SimonSays => "Simon Says",
        };
        f.write_str(name)
    }
}

/// One selectable component of a module (a wire, a key, a pad).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Label shown to the player.
    pub label: String,
    /// Input submitted when the player picks this choice.
    pub input: PuzzleInput,
    /// Already used (cut wire, pressed key).
    pub spent: bool,
}

/// Read-only rendering model of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDisplay {
    /// Module title.
    pub title: String,
    /// Free-form description lines (sequence shown, progress, ...).
    pub lines: Vec<String>,
    /// Components the player can act on, in order.
    pub choices: Vec<Choice>,
    /// Rule summary for the trainee. `None` if the module explains itself.
    pub hint: Option<String>,
}

/// Capability contract of a puzzle module.
///
/// # Invariants
///
/// - `submit` never panics on any input; unsupported input is an error and
///   leaves the module unchanged.
/// - After `reset`, the module is in a fresh unsolved configuration.
pub trait ModulePuzzle: fmt::Debug + Send + Sync {
    /// Variant of this module.
    fn kind(&self) -> ModuleKind;

    /// Current display state for rendering.
    fn display(&self) -> ModuleDisplay;

    /// Apply one answer.
    ///
    /// # Errors
    ///
    /// [`PuzzleError::UnsupportedInput`] if the input variant does not apply
    /// to this module, [`PuzzleError::NoSuchChoice`] if it addresses a missing
    /// component.
    fn submit(&mut self, input: PuzzleInput) -> Result<SubmitOutcome, PuzzleError>;

    /// Return to a fresh unsolved configuration.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn generate_builds_requested_kind() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for kind in ModuleKind::ALL {
            assert_eq!(kind.generate(&mut rng).kind(), kind);
        }
    }

    #[test]
    fn kind_names_parse_from_snake_case() {
        let kinds: Vec<ModuleKind> =
            serde_yml::from_str("[wires, keypad, simon_says]").unwrap_or_default();
        assert_eq!(kinds, ModuleKind::ALL.to_vec());
    }

    #[test]
    fn every_kind_rejects_foreign_input_without_changing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for kind in ModuleKind::ALL {
            let mut module = kind.generate(&mut rng);
            let before = module.display();
            let foreign = match kind {
                ModuleKind::Wires => PuzzleInput::Color(SimonColor::Red),
                ModuleKind::Keypad | ModuleKind::SimonSays => PuzzleInput::Cut(0),
            };
            assert!(matches!(module.submit(foreign), Err(PuzzleError::UnsupportedInput { .. })));
            assert_eq!(module.display(), before);
        }
    }
}
