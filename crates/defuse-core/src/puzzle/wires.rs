//! Wires module: exactly one wire is the right one to cut.

use std::fmt;

use rand::Rng;

use super::{Choice, ModuleDisplay, ModuleKind, ModulePuzzle, PuzzleInput, SubmitOutcome};
use crate::PuzzleError;

const MIN_WIRES: usize = 3;
const MAX_WIRES: usize = 6;

/// Insulation colour of a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireColor {
    /// Red.
    Red,
    /// White.
    White,
    /// Blue.
    Blue,
    /// Yellow.
    Yellow,
    /// Black.
    Black,
}

impl WireColor {
    const ALL: [Self; 5] = [Self::Red, Self::White, Self::Blue, Self::Yellow, Self::Black];
}

impl fmt::Display for WireColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::White => "white",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Black => "black",
        };
        f.write_str(name)
    }
}

/// A panel of 3 to 6 wires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wires {
    colors: Vec<WireColor>,
    /// Index of the wire that was correctly cut. `None` until solved.
    cut: Option<usize>,
}

impl Wires {
    /// Generate a random panel.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let count = rng.gen_range(MIN_WIRES..=MAX_WIRES);
        let colors = (0..count)
            .map(|_| WireColor::ALL[rng.gen_range(0..WireColor::ALL.len())])
            .collect();
        Self { colors, cut: None }
    }

    /// Index of the wire that must be cut.
    pub fn solution(&self) -> usize {
        let colors = &self.colors;
        let count = |c: WireColor| colors.iter().filter(|&&w| w == c).count();
        let last_of = |c: WireColor| colors.iter().rposition(|&w| w == c);
        let last = colors.len() - 1;
        let last_color = colors[last];

        match colors.len() {
            3 => {
                if count(WireColor::Red) == 0 {
                    1
                } else if last_color == WireColor::White {
                    last
                } else if count(WireColor::Blue) > 1 {
                    last_of(WireColor::Blue).unwrap_or(last)
                } else {
                    last
                }
            },
            4 => {
                if count(WireColor::Red) > 1 {
                    last_of(WireColor::Red).unwrap_or(last)
                } else if last_color == WireColor::Yellow && count(WireColor::Red) == 0 {
                    0
                } else if count(WireColor::Blue) == 1 {
                    0
                } else if count(WireColor::Yellow) > 1 {
                    last
                } else {
                    1
                }
            },
            5 => {
                if last_color == WireColor::Black {
                    3
                } else if count(WireColor::Red) == 1 && count(WireColor::Yellow) > 1 {
                    0
                } else if count(WireColor::Black) == 0 {
                    1
                } else {
                    0
                }
            },
            _ => {
                if count(WireColor::Yellow) == 0 {
                    2
                } else if count(WireColor::Yellow) == 1 && count(WireColor::White) > 1 {
                    3
                } else if count(WireColor::Red) == 0 {
                    last
                } else {
                    3
                }
            },
        }
    }

    fn rule_text(&self) -> &'static str {
        match self.colors.len() {
            3 => {
                "No red: cut 2nd. Last white: cut last. >1 blue: cut last blue. Else cut last."
            },
            4 => {
                ">1 red: cut last red. Last yellow and no red: cut 1st. One blue: cut 1st. \
                 >1 yellow: cut last. Else cut 2nd."
            },
            5 => {
                "Last black: cut 4th. One red and >1 yellow: cut 1st. No black: cut 2nd. \
                 Else cut 1st."
            },
            _ => {
                "No yellow: cut 3rd. One yellow and >1 white: cut 4th. No red: cut last. \
                 Else cut 4th."
            },
        }
    }
}

impl ModulePuzzle for Wires {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Wires
    }

    fn display(&self) -> ModuleDisplay {
        let choices = self
            .colors
            .iter()
            .enumerate()
            .map(|(i, color)| Choice {
                label: format!("{color} wire"),
                input: PuzzleInput::Cut(i),
                spent: self.cut == Some(i),
            })
            .collect();

        let status = match self.cut {
            Some(i) => format!("Wire {} cut.", i + 1),
            None => format!("{} wires. Cut one.", self.colors.len()),
        };

        ModuleDisplay {
            title: ModuleKind::Wires.to_string(),
            lines: vec![status],
            choices,
            hint: Some(self.rule_text().to_string()),
        }
    }

    fn submit(&mut self, input: PuzzleInput) -> Result<SubmitOutcome, PuzzleError> {
        let PuzzleInput::Cut(index) = input else {
            return Err(PuzzleError::UnsupportedInput {
                kind: ModuleKind::Wires,
                input: input.name(),
            });
        };
        if index >= self.colors.len() {
            return Err(PuzzleError::NoSuchChoice { kind: ModuleKind::Wires, index });
        }
        if self.cut.is_some() {
            return Ok(SubmitOutcome::Solved);
        }

        if index == self.solution() {
            self.cut = Some(index);
            Ok(SubmitOutcome::Solved)
        } else {
            Ok(SubmitOutcome::Failed)
        }
    }

    fn reset(&mut self) {
        self.cut = None;
    }
}
