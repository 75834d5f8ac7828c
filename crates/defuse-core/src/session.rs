//! Session context: what the player picked while navigating menus.
//!
//! The [`SessionContext`] is filled field by field as the player moves
//! through the menus, frozen when loading starts, and consumed by the loader
//! to build a bomb. Once frozen every setter fails with
//! [`ContextError::Frozen`].

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while filling a session context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The context was frozen by the loading screen.
    #[error("session context is frozen")]
    Frozen,

    /// Free-play parameters outside the supported bounds.
    #[error("invalid free-play config: {reason}")]
    InvalidConfig {
        /// Which bound was violated.
        reason: String,
    },

    /// A selection needed by the loader is missing.
    #[error("session context has no {missing}")]
    Incomplete {
        /// Name of the missing field.
        missing: &'static str,
    },
}

/// Game mode chosen from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Catalog missions grouped in sections.
    Campaign,
    /// Player-configured bomb.
    FreePlay,
}

/// Campaign section identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub u32);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section {}", self.0)
    }
}

/// Campaign mission identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(pub String);

impl MissionId {
    /// Build an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for MissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable free-play parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FreePlayField {
    /// Number of modules.
    Modules,
    /// Countdown length.
    Time,
    /// Strike limit.
    Strikes,
}

impl FreePlayField {
    /// Fields in editor order.
    pub const ALL: [Self; 3] = [Self::Modules, Self::Time, Self::Strikes];
}

/// Quick free-play presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickPreset {
    /// 3 modules, 5 minutes, 3 strikes.
    Easy,
    /// 5 modules, 5 minutes, 3 strikes.
    Normal,
    /// 8 modules, 4 minutes, 2 strikes.
    Hard,
}

impl QuickPreset {
    /// Presets in menu order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];
}

impl fmt::Display for QuickPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// Free-play bomb parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FreePlayConfig {
    /// Number of modules on the bomb.
    pub module_count: usize,
    /// Countdown length.
    pub time_budget: Duration,
    /// Strikes that detonate the bomb.
    pub strike_limit: u32,
    /// Seed for module generation.
    pub seed: u64,
}

impl FreePlayConfig {
    /// Smallest and largest module count.
    pub const MODULES: (usize, usize) = (1, 11);
    /// Shortest and longest countdown.
    pub const TIME: (Duration, Duration) = (Duration::from_secs(30), Duration::from_secs(600));
    /// Countdown adjustment step.
    pub const TIME_STEP: Duration = Duration::from_secs(30);
    /// Smallest and largest strike limit.
    pub const STRIKES: (u32, u32) = (1, 5);

    /// Config for a quick preset.
    pub fn preset(preset: QuickPreset, seed: u64) -> Self {
        let (module_count, secs, strike_limit) = match preset {
            QuickPreset::Easy => (3, 300, 3),
            QuickPreset::Normal => (5, 300, 3),
            QuickPreset::Hard => (8, 240, 2),
        };
        Self { module_count, time_budget: Duration::from_secs(secs), strike_limit, seed }
    }

    /// Check every parameter against its bounds.
    pub fn validate(&self) -> Result<(), ContextError> {
        let (min_modules, max_modules) = Self::MODULES;
        if !(min_modules..=max_modules).contains(&self.module_count) {
            return Err(ContextError::InvalidConfig {
                reason: format!(
                    "module count {} outside {min_modules}..={max_modules}",
                    self.module_count
                ),
            });
        }
        let (min_time, max_time) = Self::TIME;
        if !(min_time..=max_time).contains(&self.time_budget) {
            return Err(ContextError::InvalidConfig {
                reason: format!(
                    "time budget {}s outside {}s..={}s",
                    self.time_budget.as_secs(),
                    min_time.as_secs(),
                    max_time.as_secs()
                ),
            });
        }
        let (min_strikes, max_strikes) = Self::STRIKES;
        if !(min_strikes..=max_strikes).contains(&self.strike_limit) {
            return Err(ContextError::InvalidConfig {
                reason: format!(
                    "strike limit {} outside {min_strikes}..={max_strikes}",
                    self.strike_limit
                ),
            });
        }
        Ok(())
    }

    /// Move one field a step up or down, clamped to its bounds.
    pub fn step(&mut self, field: FreePlayField, up: bool) {
        match field {
            FreePlayField::Modules => {
                let (min, max) = Self::MODULES;
                self.module_count = if up {
                    self.module_count.saturating_add(1).min(max)
                } else {
                    self.module_count.saturating_sub(1).max(min)
                };
            },
            FreePlayField::Time => {
                let (min, max) = Self::TIME;
                self.time_budget = if up {
                    self.time_budget.saturating_add(Self::TIME_STEP).min(max)
                } else {
                    self.time_budget.saturating_sub(Self::TIME_STEP).max(min)
                };
            },
            FreePlayField::Strikes => {
                let (min, max) = Self::STRIKES;
                self.strike_limit = if up {
                    self.strike_limit.saturating_add(1).min(max)
                } else {
                    self.strike_limit.saturating_sub(1).max(min)
                };
            },
        }
    }
}

/// What the loader has to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A catalog mission.
    Campaign {
        /// Section the mission belongs to.
        section: SectionId,
        /// Mission to load.
        mission: MissionId,
    },
    /// A configured free-play bomb.
    FreePlay(FreePlayConfig),
}

/// Menu choices accumulated during one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    mode: Option<Mode>,
    section: Option<SectionId>,
    mission: Option<MissionId>,
    free_play: Option<FreePlayConfig>,
    frozen: bool,
}

impl SessionContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the game mode.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), ContextError> {
        self.ensure_open()?;
        self.mode = Some(mode);
        Ok(())
    }

    /// Record the campaign section.
    pub fn set_section(&mut self, section: SectionId) -> Result<(), ContextError> {
        self.ensure_open()?;
        self.section = Some(section);
        Ok(())
    }

    /// Forget the campaign section (back navigation).
    pub fn clear_section(&mut self) -> Result<(), ContextError> {
        self.ensure_open()?;
        self.section = None;
        Ok(())
    }

    /// Record the campaign mission.
    pub fn set_mission(&mut self, mission: MissionId) -> Result<(), ContextError> {
        self.ensure_open()?;
        self.mission = Some(mission);
        Ok(())
    }

    /// Validate and record free-play parameters.
    pub fn set_free_play(&mut self, config: FreePlayConfig) -> Result<(), ContextError> {
        self.ensure_open()?;
        config.validate()?;
        self.free_play = Some(config);
        Ok(())
    }

    /// Freeze the context. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Returns true once loading has started.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Chosen mode. `None` before the main menu choice.
    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// Chosen section. `None` outside campaign or before the choice.
    pub fn section(&self) -> Option<SectionId> {
        self.section
    }

    /// Chosen mission. `None` until chosen.
    pub fn mission(&self) -> Option<&MissionId> {
        self.mission.as_ref()
    }

    /// Free-play parameters. `None` until confirmed.
    pub fn free_play(&self) -> Option<&FreePlayConfig> {
        self.free_play.as_ref()
    }

    /// What the loader has to build.
    pub fn selection(&self) -> Result<Selection, ContextError> {
        match self.mode.ok_or(ContextError::Incomplete { missing: "mode" })? {
            Mode::Campaign => Ok(Selection::Campaign {
                section: self.section.ok_or(ContextError::Incomplete { missing: "section" })?,
                mission: self
                    .mission
                    .clone()
                    .ok_or(ContextError::Incomplete { missing: "mission" })?,
            }),
            Mode::FreePlay => self
                .free_play
                .map(Selection::FreePlay)
                .ok_or(ContextError::Incomplete { missing: "free-play config" }),
        }
    }

    fn ensure_open(&self) -> Result<(), ContextError> {
        if self.frozen { Err(ContextError::Frozen) } else { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_selection_requires_section_and_mission() {
        let mut ctx = SessionContext::new();
        assert_eq!(ctx.selection(), Err(ContextError::Incomplete { missing: "mode" }));

        ctx.set_mode(Mode::Campaign).ok();
        ctx.set_section(SectionId(1)).ok();
        assert_eq!(ctx.selection(), Err(ContextError::Incomplete { missing: "mission" }));

        ctx.set_mission(MissionId::new("first-bomb")).ok();
        assert_eq!(
            ctx.selection(),
            Ok(Selection::Campaign { section: SectionId(1), mission: MissionId::new("first-bomb") })
        );
    }

    #[test]
    fn frozen_context_rejects_every_setter() {
        let mut ctx = SessionContext::new();
        ctx.set_mode(Mode::FreePlay).ok();
        ctx.freeze();

        assert_eq!(ctx.set_mode(Mode::Campaign), Err(ContextError::Frozen));
        assert_eq!(ctx.set_section(SectionId(2)), Err(ContextError::Frozen));
        assert_eq!(ctx.clear_section(), Err(ContextError::Frozen));
        assert_eq!(ctx.set_mission(MissionId::new("x")), Err(ContextError::Frozen));
        assert_eq!(
            ctx.set_free_play(FreePlayConfig::preset(QuickPreset::Easy, 1)),
            Err(ContextError::Frozen)
        );
        assert_eq!(ctx.mode(), Some(Mode::FreePlay));
    }

    #[test]
    fn invalid_free_play_config_is_not_recorded() {
        let mut ctx = SessionContext::new();
        let mut config = FreePlayConfig::preset(QuickPreset::Normal, 1);
        config.module_count = 0;

        assert!(matches!(ctx.set_free_play(config), Err(ContextError::InvalidConfig { .. })));
        assert!(ctx.free_play().is_none());
    }

    #[test]
    fn presets_are_valid() {
        for preset in QuickPreset::ALL {
            assert_eq!(FreePlayConfig::preset(preset, 0).validate(), Ok(()));
        }
    }

    #[test]
    fn step_clamps_to_bounds() {
        let mut config = FreePlayConfig::preset(QuickPreset::Easy, 0);
        for _ in 0..20 {
            config.step(FreePlayField::Modules, true);
            config.step(FreePlayField::Time, true);
            config.step(FreePlayField::Strikes, false);
        }
        assert_eq!(config.module_count, FreePlayConfig::MODULES.1);
        assert_eq!(config.time_budget, FreePlayConfig::TIME.1);
        assert_eq!(config.strike_limit, FreePlayConfig::STRIKES.0);
        assert_eq!(config.validate(), Ok(()));
    }
}
