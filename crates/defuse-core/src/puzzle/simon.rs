//! Simon says module: repeat a growing colour sequence through a fixed
//! translation table.

use std::fmt;

use rand::Rng;

use super::{Choice, ModuleDisplay, ModuleKind, ModulePuzzle, PuzzleInput, SubmitOutcome};
use crate::PuzzleError;

const MIN_STAGES: usize = 3;
const MAX_STAGES: usize = 5;

/// Pad colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimonColor {
    /// Red pad.
    Red,
    /// Blue pad.
    Blue,
    /// Green pad.
    Green,
    /// Yellow pad.
    Yellow,
}

impl SimonColor {
    /// Every pad, in display order.
    pub const ALL: [Self; 4] = [Self::Red, Self::Blue, Self::Green, Self::Yellow];

    /// Pad to press when this colour flashes.
    pub fn response(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Yellow,
            Self::Green => Self::Green,
            Self::Yellow => Self::Red,
        }
    }
}

impl fmt::Display for SimonColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
        };
        f.write_str(name)
    }
}

/// Staged colour sequence.
///
/// Stage `n` flashes the first `n` colours of the sequence; the player answers
/// with the translated colour of each, in order. Finishing the last stage
/// solves the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimonSays {
    sequence: Vec<SimonColor>,
    /// Number of colours flashed in the current stage (1-based).
    stage: usize,
    /// Correct answers given in the current stage.
    entered: usize,
    solved: bool,
}

impl SimonSays {
    /// Generate a random sequence.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let stages = rng.gen_range(MIN_STAGES..=MAX_STAGES);
        let sequence = (0..stages)
            .map(|_| SimonColor::ALL[rng.gen_range(0..SimonColor::ALL.len())])
            .collect();
        Self { sequence, stage: 1, entered: 0, solved: false }
    }

    /// Colours flashing in the current stage.
    pub fn flashing(&self) -> &[SimonColor] {
        &self.sequence[..self.stage]
    }
}

impl ModulePuzzle for SimonSays {
    fn kind(&self) -> ModuleKind {
        ModuleKind::SimonSays
    }

    fn display(&self) -> ModuleDisplay {
        let flashing =
            self.flashing().iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
        let lines = if self.solved {
            vec!["Sequence complete.".to_string()]
        } else {
            vec![
                format!("Stage {} of {}", self.stage, self.sequence.len()),
                format!("Flashing: {flashing}"),
                format!("Entered: {}/{}", self.entered, self.stage),
            ]
        };

        let choices = SimonColor::ALL
            .iter()
            .map(|&color| Choice {
                label: format!("{color} pad"),
                input: PuzzleInput::Color(color),
                spent: false,
            })
            .collect();

        let table = SimonColor::ALL
            .iter()
            .map(|c| format!("{c}->{}", c.response()))
            .collect::<Vec<_>>()
            .join(", ");

        ModuleDisplay {
            title: ModuleKind::SimonSays.to_string(),
            lines,
            choices,
            hint: Some(format!("Answer each flash: {table}")),
        }
    }

    fn submit(&mut self, input: PuzzleInput) -> Result<SubmitOutcome, PuzzleError> {
        let PuzzleInput::Color(color) = input else {
            return Err(PuzzleError::UnsupportedInput {
                kind: ModuleKind::SimonSays,
                input: input.name(),
            });
        };
        if self.solved {
            return Ok(SubmitOutcome::Solved);
        }

        let expected = self.sequence[self.entered].response();
        if color != expected {
            return Ok(SubmitOutcome::Failed);
        }

        self.entered += 1;
        if self.entered < self.stage {
            return Ok(SubmitOutcome::StillUnsolved);
        }
        if self.stage == self.sequence.len() {
            self.solved = true;
            return Ok(SubmitOutcome::Solved);
        }

        self.stage += 1;
        self.entered = 0;
        Ok(SubmitOutcome::StillUnsolved)
    }

    fn reset(&mut self) {
        self.stage = 1;
        self.entered = 0;
        self.solved = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::SimonColor::{Blue, Green, Red, Yellow};

    fn simon(sequence: &[SimonColor]) -> SimonSays {
        SimonSays { sequence: sequence.to_vec(), stage: 1, entered: 0, solved: false }
    }

    fn answer(module: &mut SimonSays, color: SimonColor) -> Result<SubmitOutcome, PuzzleError> {
        module.submit(PuzzleInput::Color(color))
    }

    #[test]
    fn stages_grow_until_solved() {
        // red -> blue, green -> green
        let mut module = simon(&[Red, Green]);
        assert_eq!(module.flashing(), [Red]);
        assert_eq!(answer(&mut module, Blue), Ok(SubmitOutcome::StillUnsolved));

        assert_eq!(module.flashing(), [Red, Green]);
        assert_eq!(answer(&mut module, Blue), Ok(SubmitOutcome::StillUnsolved));
        assert_eq!(answer(&mut module, Green), Ok(SubmitOutcome::Solved));
    }

    #[test]
    fn wrong_colour_fails_and_reset_restarts() {
        let mut module = simon(&[Yellow, Blue, Red]);
        assert_eq!(answer(&mut module, Red), Ok(SubmitOutcome::StillUnsolved));
        assert_eq!(answer(&mut module, Red), Ok(SubmitOutcome::StillUnsolved));
        assert_eq!(answer(&mut module, Red), Ok(SubmitOutcome::Failed));

        module.reset();
        assert_eq!(module.flashing(), [Yellow]);
    }

    #[test]
    fn response_table_is_a_permutation() {
        let mut responses: Vec<_> = SimonColor::ALL.iter().map(|c| c.response()).collect();
        responses.sort_by_key(|c| SimonColor::ALL.iter().position(|x| x == c));
        assert_eq!(responses, SimonColor::ALL.to_vec());
    }

    #[test]
    fn press_input_is_unsupported() {
        let mut module = simon(&[Red]);
        assert_eq!(
            module.submit(PuzzleInput::Press(0)),
            Err(PuzzleError::UnsupportedInput { kind: ModuleKind::SimonSays, input: "press" })
        );
    }
}
