//! Bomb model: modules, strikes, and the countdown.
//!
//! The [`BombModel`] owns its modules and derives one overall [`BombStatus`]
//! from them, the strike counter and the remaining time. Status is recomputed
//! after every mutation; once it leaves [`BombStatus::Arming`] the bomb is
//! frozen and every mutator is rejected.
//!
//! # Invariants
//!
//! - Remaining time never increases, and strictly decreases on every positive
//!   tick while arming.
//! - Strikes never decrease, and never change once the bomb is terminal.
//! - `Exploded` only if remaining time is zero or strikes reached the limit.
//! - `Defused` only if every module is solved.

use std::time::Duration;

use crate::{
    BombError, ModuleDisplay, ModuleKind, ModulePuzzle, ModuleStatus, PuzzleInput, SubmitOutcome,
};

/// Overall status of the bomb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BombStatus {
    /// Neither defused nor exploded.
    Arming,
    /// Every module solved in time.
    Defused,
    /// Time ran out or the strike limit was reached.
    Exploded,
}

impl BombStatus {
    /// Returns true once the bomb can no longer change.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Arming)
    }
}

/// Why a bomb exploded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LossCause {
    /// The countdown reached zero.
    TimeExpired,
    /// The strike counter reached the strike limit.
    StrikeLimit,
}

/// Which condition wins when explosion and defusal hold at the same
/// recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
    /// Explosion conditions are checked first.
    #[default]
    FailureFirst,
    /// All-solved defusal is checked first.
    DefusalFirst,
}

/// Status an arming bomb moves to, given which conditions currently hold.
pub fn resolve_status(precedence: Precedence, exploded: bool, defused: bool) -> BombStatus {
    match (precedence, exploded, defused) {
        (_, false, false) => BombStatus::Arming,
        (_, true, false) | (Precedence::FailureFirst, true, true) => BombStatus::Exploded,
        (_, false, true) | (Precedence::DefusalFirst, true, true) => BombStatus::Defused,
    }
}

/// Everything a loader produces for one bomb.
#[derive(Debug)]
pub struct Loadout {
    /// Modules in addressing order.
    pub modules: Vec<Box<dyn ModulePuzzle>>,
    /// Countdown length.
    pub time_budget: Duration,
    /// Strikes that detonate the bomb.
    pub strike_limit: u32,
}

#[derive(Debug)]
struct ModuleSlot {
    puzzle: Box<dyn ModulePuzzle>,
    status: ModuleStatus,
}

/// The device being defused.
#[derive(Debug)]
pub struct BombModel {
    slots: Vec<ModuleSlot>,
    strikes: u32,
    strike_limit: u32,
    budget: Duration,
    elapsed: Duration,
    status: BombStatus,
    cause: Option<LossCause>,
    precedence: Precedence,
}

impl BombModel {
    /// Arm a bomb from a loadout with the default precedence.
    ///
    /// # Errors
    ///
    /// [`BombError::InvalidLoadout`] if there are no modules, no time, or a
    /// zero strike limit.
    pub fn new(loadout: Loadout) -> Result<Self, BombError> {
        Self::with_precedence(loadout, Precedence::default())
    }

    /// Arm a bomb with an explicit precedence policy.
    pub fn with_precedence(loadout: Loadout, precedence: Precedence) -> Result<Self, BombError> {
        let Loadout { modules, time_budget, strike_limit } = loadout;
        if modules.is_empty() {
            return Err(invalid("bomb needs at least one module"));
        }
        if time_budget.is_zero() {
            return Err(invalid("time budget must be positive"));
        }
        if strike_limit == 0 {
            return Err(invalid("strike limit must be at least 1"));
        }

        let slots = modules
            .into_iter()
            .map(|puzzle| ModuleSlot { puzzle, status: ModuleStatus::Unsolved })
            .collect();

        Ok(Self {
            slots,
            strikes: 0,
            strike_limit,
            budget: time_budget,
            elapsed: Duration::ZERO,
            status: BombStatus::Arming,
            cause: None,
            precedence,
        })
    }

    /// Advance the countdown and recompute status.
    ///
    /// A zero `elapsed` changes nothing. Ticking a terminal bomb is a no-op.
    pub fn tick(&mut self, elapsed: Duration) -> BombStatus {
        if self.status.is_terminal() || elapsed.is_zero() {
            return self.status;
        }
        self.elapsed = self.elapsed.saturating_add(elapsed).min(self.budget);
        self.recompute();
        self.status
    }

    /// Record a failed answer on module `index`.
    ///
    /// The strike is counted once per failure, then the module is reset for
    /// another attempt unless this strike detonated the bomb.
    pub fn report_failure(&mut self, index: usize) -> Result<BombStatus, BombError> {
        let slot = self.arming_slot(index)?;
        slot.status = ModuleStatus::Failed;
        self.strikes = self.strikes.saturating_add(1);
        tracing::debug!(module = index, strikes = self.strikes, "strike recorded");

        self.recompute();
        if !self.status.is_terminal()
            && let Some(slot) = self.slots.get_mut(index)
        {
            slot.puzzle.reset();
            slot.status = ModuleStatus::Unsolved;
        }
        Ok(self.status)
    }

    /// Mark module `index` solved.
    pub fn report_success(&mut self, index: usize) -> Result<BombStatus, BombError> {
        let slot = self.arming_slot(index)?;
        slot.status = ModuleStatus::Solved;
        tracing::debug!(module = index, "module solved");

        self.recompute();
        Ok(self.status)
    }

    /// Route an answer to module `index` and apply its outcome.
    pub fn submit(&mut self, index: usize, input: PuzzleInput) -> Result<SubmitOutcome, BombError> {
        let slot = self.arming_slot(index)?;
        let outcome = slot.puzzle.submit(input)?;

        match outcome {
            SubmitOutcome::Solved => {
                self.report_success(index)?;
            },
            SubmitOutcome::Failed => {
                self.report_failure(index)?;
            },
            SubmitOutcome::StillUnsolved => {},
        }
        Ok(outcome)
    }

    /// Module at `index`.
    pub fn addressed_module(&self, index: usize) -> Result<&dyn ModulePuzzle, BombError> {
        self.slots
            .get(index)
            .map(|slot| slot.puzzle.as_ref())
            .ok_or(BombError::OutOfRange { index, len: self.slots.len() })
    }

    /// Status of module `index`.
    pub fn module_status(&self, index: usize) -> Result<ModuleStatus, BombError> {
        self.slots
            .get(index)
            .map(|slot| slot.status)
            .ok_or(BombError::OutOfRange { index, len: self.slots.len() })
    }

    /// Overall status.
    pub fn status(&self) -> BombStatus {
        self.status
    }

    /// Why the bomb exploded. `None` unless exploded.
    pub fn loss_cause(&self) -> Option<LossCause> {
        self.cause
    }

    /// Recorded strikes.
    pub fn strikes(&self) -> u32 {
        self.strikes
    }

    /// Strikes that detonate the bomb.
    pub fn strike_limit(&self) -> u32 {
        self.strike_limit
    }

    /// Time left on the countdown.
    pub fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.elapsed)
    }

    /// Time spent since arming.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of modules.
    pub fn module_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of solved modules.
    pub fn solved_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.status == ModuleStatus::Solved).count()
    }

    /// Owned snapshot for rendering.
    pub fn view(&self) -> BombView {
        BombView {
            status: self.status,
            cause: self.cause,
            strikes: self.strikes,
            strike_limit: self.strike_limit,
            remaining: self.remaining(),
            elapsed: self.elapsed,
            modules: self
                .slots
                .iter()
                .map(|slot| ModuleView {
                    kind: slot.puzzle.kind(),
                    status: slot.status,
                    display: slot.puzzle.display(),
                })
                .collect(),
        }
    }

    /// Slot `index` of an arming bomb that still accepts input.
    fn arming_slot(&mut self, index: usize) -> Result<&mut ModuleSlot, BombError> {
        if self.status.is_terminal() {
            return Err(BombError::Terminal { status: self.status });
        }
        let len = self.slots.len();
        let slot = self.slots.get_mut(index).ok_or(BombError::OutOfRange { index, len })?;
        if slot.status == ModuleStatus::Solved {
            return Err(BombError::ModuleSolved { index });
        }
        Ok(slot)
    }

    fn recompute(&mut self) {
        if self.status.is_terminal() {
            return;
        }

        let strike_out = self.strikes >= self.strike_limit;
        let timed_out = self.remaining().is_zero();
        let defused = self.slots.iter().all(|slot| slot.status == ModuleStatus::Solved);

        self.status = resolve_status(self.precedence, strike_out || timed_out, defused);
        match self.status {
            BombStatus::Exploded => {
                let cause =
                    if strike_out { LossCause::StrikeLimit } else { LossCause::TimeExpired };
                self.cause = Some(cause);
                tracing::info!(?cause, strikes = self.strikes, "bomb exploded");
            },
            BombStatus::Defused => {
                tracing::info!(remaining = ?self.remaining(), "bomb defused");
            },
            BombStatus::Arming => {},
        }
    }
}

fn invalid(reason: &str) -> BombError {
    BombError::InvalidLoadout { reason: reason.to_string() }
}

/// Owned view of one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleView {
    /// Module variant.
    pub kind: ModuleKind,
    /// Status tracked by the bomb.
    pub status: ModuleStatus,
    /// Display state reported by the module.
    pub display: ModuleDisplay,
}

/// Owned, consistent snapshot of a bomb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BombView {
    /// Overall status.
    pub status: BombStatus,
    /// Why the bomb exploded. `None` unless exploded.
    pub cause: Option<LossCause>,
    /// Recorded strikes.
    pub strikes: u32,
    /// Strikes that detonate the bomb.
    pub strike_limit: u32,
    /// Time left.
    pub remaining: Duration,
    /// Time spent.
    pub elapsed: Duration,
    /// Modules in addressing order.
    pub modules: Vec<ModuleView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PuzzleError, SimonColor};

    /// Module solved by pressing button 0, failed by any other button.
    #[derive(Debug, Default)]
    struct Toggle {
        resets: usize,
    }

    impl ModulePuzzle for Toggle {
        fn kind(&self) -> ModuleKind {
            ModuleKind::Keypad
        }

        fn display(&self) -> ModuleDisplay {
            ModuleDisplay { title: "toggle".into(), lines: vec![], choices: vec![], hint: None }
        }

        fn submit(&mut self, input: PuzzleInput) -> Result<SubmitOutcome, PuzzleError> {
            match input {
                PuzzleInput::Press(0) => Ok(SubmitOutcome::Solved),
                PuzzleInput::Press(_) => Ok(SubmitOutcome::Failed),
                other => Err(PuzzleError::UnsupportedInput {
                    kind: ModuleKind::Keypad,
                    input: other.name(),
                }),
            }
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    fn loadout(modules: usize, secs: u64, strike_limit: u32) -> Loadout {
        Loadout {
            modules: (0..modules)
                .map(|_| Box::new(Toggle::default()) as Box<dyn ModulePuzzle>)
                .collect(),
            time_budget: Duration::from_secs(secs),
            strike_limit,
        }
    }

    fn bomb(modules: usize, secs: u64, strike_limit: u32) -> BombModel {
        match BombModel::new(loadout(modules, secs, strike_limit)) {
            Ok(bomb) => bomb,
            Err(e) => unreachable!("valid loadout rejected: {e}"),
        }
    }

    #[test]
    fn precedence_table_is_exhaustive() {
        use Precedence::{DefusalFirst, FailureFirst};
        for precedence in [FailureFirst, DefusalFirst] {
            assert_eq!(resolve_status(precedence, false, false), BombStatus::Arming);
            assert_eq!(resolve_status(precedence, true, false), BombStatus::Exploded);
            assert_eq!(resolve_status(precedence, false, true), BombStatus::Defused);
        }
        assert_eq!(resolve_status(FailureFirst, true, true), BombStatus::Exploded);
        assert_eq!(resolve_status(DefusalFirst, true, true), BombStatus::Defused);
    }

    #[test]
    fn coincident_conditions_follow_precedence() {
        for (precedence, expected) in [
            (Precedence::FailureFirst, BombStatus::Exploded),
            (Precedence::DefusalFirst, BombStatus::Defused),
        ] {
            let mut bomb = bomb(1, 10, 1);
            bomb.precedence = precedence;
            bomb.slots[0].status = ModuleStatus::Solved;
            bomb.strikes = 1;
            bomb.recompute();
            assert_eq!(bomb.status(), expected);
        }
    }

    #[test]
    fn invalid_loadouts_are_rejected() {
        assert!(matches!(BombModel::new(loadout(0, 10, 3)), Err(BombError::InvalidLoadout { .. })));
        assert!(matches!(BombModel::new(loadout(1, 0, 3)), Err(BombError::InvalidLoadout { .. })));
        assert!(matches!(BombModel::new(loadout(1, 10, 0)), Err(BombError::InvalidLoadout { .. })));
    }

    #[test]
    fn zero_tick_changes_nothing() {
        let mut bomb = bomb(3, 300, 3);
        let before = bomb.view();
        assert_eq!(bomb.tick(Duration::ZERO), BombStatus::Arming);
        assert_eq!(bomb.view(), before);
    }

    #[test]
    fn failure_resets_module_and_counts_once() {
        let mut bomb = bomb(2, 300, 3);
        assert_eq!(bomb.submit(0, PuzzleInput::Press(1)), Ok(SubmitOutcome::Failed));
        assert_eq!(bomb.strikes(), 1);
        assert_eq!(bomb.module_status(0), Ok(ModuleStatus::Unsolved));

        // Ticking does not resample the failure.
        bomb.tick(Duration::from_secs(1));
        bomb.tick(Duration::from_secs(1));
        assert_eq!(bomb.strikes(), 1);
    }

    #[test]
    fn exploding_strike_leaves_module_failed() {
        let mut bomb = bomb(2, 300, 1);
        assert_eq!(bomb.report_failure(1), Ok(BombStatus::Exploded));
        assert_eq!(bomb.module_status(1), Ok(ModuleStatus::Failed));
        assert_eq!(bomb.loss_cause(), Some(LossCause::StrikeLimit));
    }

    #[test]
    fn terminal_bomb_rejects_mutation() {
        let mut bomb = bomb(1, 300, 3);
        assert_eq!(bomb.report_success(0), Ok(BombStatus::Defused));
        assert_eq!(
            bomb.report_failure(0),
            Err(BombError::Terminal { status: BombStatus::Defused })
        );
        assert_eq!(bomb.tick(Duration::from_secs(400)), BombStatus::Defused);
        assert_eq!(bomb.strikes(), 0);
        assert_eq!(bomb.remaining(), Duration::from_secs(300));
    }

    #[test]
    fn solved_module_rejects_input() {
        let mut bomb = bomb(2, 300, 3);
        assert_eq!(bomb.submit(0, PuzzleInput::Press(0)), Ok(SubmitOutcome::Solved));
        assert_eq!(
            bomb.submit(0, PuzzleInput::Press(1)),
            Err(BombError::ModuleSolved { index: 0 })
        );
        assert_eq!(bomb.strikes(), 0);
    }

    #[test]
    fn foreign_input_is_a_puzzle_error() {
        let mut bomb = bomb(1, 300, 3);
        let result = bomb.submit(0, PuzzleInput::Color(SimonColor::Red));
        assert!(matches!(result, Err(BombError::Puzzle(PuzzleError::UnsupportedInput { .. }))));
        assert_eq!(bomb.status(), BombStatus::Arming);
    }

    #[test]
    fn addressing_is_bounds_checked() {
        let bomb = bomb(3, 300, 3);
        assert!(bomb.addressed_module(2).is_ok());
        assert!(matches!(
            bomb.addressed_module(5),
            Err(BombError::OutOfRange { index: 5, len: 3 })
        ));
    }

    #[test]
    fn timeout_reports_cause() {
        let mut bomb = bomb(1, 30, 3);
        assert_eq!(bomb.tick(Duration::from_secs(29)), BombStatus::Arming);
        assert_eq!(bomb.tick(Duration::from_secs(5)), BombStatus::Exploded);
        assert_eq!(bomb.remaining(), Duration::ZERO);
        assert_eq!(bomb.loss_cause(), Some(LossCause::TimeExpired));
    }
}
