//! Keypad module: press four symbols in the order of their column.

use rand::{Rng, seq::SliceRandom};

use super::{Choice, ModuleDisplay, ModuleKind, ModulePuzzle, PuzzleInput, SubmitOutcome};
use crate::PuzzleError;

const KEYS: usize = 4;

/// Symbol columns. A keypad draws all four keys from one column and the
/// keys must be pressed in column order.
const COLUMNS: [[&str; 7]; 3] = [
    ["Ϙ", "Ѧ", "ƛ", "Ϟ", "Ѭ", "ϗ", "Ͽ"],
    ["Ӭ", "Ϙ", "Ͽ", "Ҩ", "☆", "ϗ", "¿"],
    ["©", "Ѽ", "Ҩ", "Җ", "Ԇ", "ƛ", "☆"],
];

/// Four-key symbol pad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    column: usize,
    /// Rank of each key within the column, in key position order.
    ranks: [usize; KEYS],
    pressed: [bool; KEYS],
}

impl Keypad {
    /// Generate a random keypad.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let column = rng.gen_range(0..COLUMNS.len());
        let mut ranks: Vec<usize> = (0..COLUMNS[column].len()).collect();
        ranks.shuffle(rng);
        let ranks = [ranks[0], ranks[1], ranks[2], ranks[3]];
        Self { column, ranks, pressed: [false; KEYS] }
    }

    fn symbol(&self, key: usize) -> &'static str {
        COLUMNS[self.column][self.ranks[key]]
    }

    /// Rank the next correct key must have. `None` once all keys are pressed.
    fn next_rank(&self) -> Option<usize> {
        self.ranks
            .iter()
            .zip(self.pressed)
            .filter(|(_, pressed)| !pressed)
            .map(|(&rank, _)| rank)
            .min()
    }

    fn pressed_count(&self) -> usize {
        self.pressed.iter().filter(|&&p| p).count()
    }
}

impl ModulePuzzle for Keypad {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Keypad
    }

    fn display(&self) -> ModuleDisplay {
        let choices = (0..KEYS)
            .map(|key| Choice {
                label: self.symbol(key).to_string(),
                input: PuzzleInput::Press(key),
                spent: self.pressed[key],
            })
            .collect();

        ModuleDisplay {
            title: ModuleKind::Keypad.to_string(),
            lines: vec![format!("{}/{KEYS} keys pressed.", self.pressed_count())],
            choices,
            hint: Some(format!("Press in column order: {}", COLUMNS[self.column].join(" "))),
        }
    }

    fn submit(&mut self, input: PuzzleInput) -> Result<SubmitOutcome, PuzzleError> {
        let PuzzleInput::Press(key) = input else {
            return Err(PuzzleError::UnsupportedInput {
                kind: ModuleKind::Keypad,
                input: input.name(),
            });
        };
        if key >= KEYS {
            return Err(PuzzleError::NoSuchChoice { kind: ModuleKind::Keypad, index: key });
        }
        if self.pressed[key] {
            return Ok(SubmitOutcome::StillUnsolved);
        }

        match self.next_rank() {
            None => Ok(SubmitOutcome::Solved),
            Some(rank) if rank == self.ranks[key] => {
                self.pressed[key] = true;
                if self.pressed_count() == KEYS {
                    Ok(SubmitOutcome::Solved)
                } else {
                    Ok(SubmitOutcome::StillUnsolved)
                }
            },
            Some(_) => Ok(SubmitOutcome::Failed),
        }
    }

    fn reset(&mut self) {
        self.pressed = [false; KEYS];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypad(ranks: [usize; KEYS]) -> Keypad {
        Keypad { column: 0, ranks, pressed: [false; KEYS] }
    }

    #[test]
    fn pressing_in_column_order_solves() {
        let mut pad = keypad([5, 1, 3, 0]);
        assert_eq!(pad.submit(PuzzleInput::Press(3)), Ok(SubmitOutcome::StillUnsolved));
        assert_eq!(pad.submit(PuzzleInput::Press(1)), Ok(SubmitOutcome::StillUnsolved));
        assert_eq!(pad.submit(PuzzleInput::Press(2)), Ok(SubmitOutcome::StillUnsolved));
        assert_eq!(pad.submit(PuzzleInput::Press(0)), Ok(SubmitOutcome::Solved));
    }

    #[test]
    fn wrong_key_fails_and_reset_clears_progress() {
        let mut pad = keypad([5, 1, 3, 0]);
        assert_eq!(pad.submit(PuzzleInput::Press(3)), Ok(SubmitOutcome::StillUnsolved));
        assert_eq!(pad.submit(PuzzleInput::Press(0)), Ok(SubmitOutcome::Failed));
        assert_eq!(pad.pressed_count(), 1);

        pad.reset();
        assert_eq!(pad.pressed_count(), 0);
        assert!(pad.display().choices.iter().all(|c| !c.spent));
    }

    #[test]
    fn repeated_press_is_harmless() {
        let mut pad = keypad([5, 1, 3, 0]);
        let _ = pad.submit(PuzzleInput::Press(3));
        assert_eq!(pad.submit(PuzzleInput::Press(3)), Ok(SubmitOutcome::StillUnsolved));
        assert_eq!(pad.pressed_count(), 1);
    }

    #[test]
    fn missing_key_is_rejected() {
        let mut pad = keypad([5, 1, 3, 0]);
        assert_eq!(
            pad.submit(PuzzleInput::Press(4)),
            Err(PuzzleError::NoSuchChoice { kind: ModuleKind::Keypad, index: 4 })
        );
    }

    #[test]
    fn display_labels_show_column_symbols() {
        let pad = keypad([0, 1, 2, 3]);
        let labels: Vec<_> = pad.display().choices.into_iter().map(|c| c.label).collect();
        assert_eq!(labels, ["Ϙ", "Ѧ", "ƛ", "Ϟ"]);
    }
}
