//! Mission catalog and the loader that turns selections into bombs.
//!
//! The catalog groups campaign missions into sections. A built-in catalog
//! ships with the crate; a YAML file with the same structure can replace it:
//!
//! ```yaml
//! sections:
//!   - id: 1
//!     name: Introduction
//!     missions:
//!       - id: first-bomb
//!         name: The First Bomb
//!         modules: [wires]
//!         time_secs: 300
//!         strike_limit: 3
//! ```
//!
//! [`CatalogLoader`] implements [`MissionLoader`], the factory the state
//! machine calls when loading finishes.

use std::{collections::HashSet, path::Path, time::Duration};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    ContextError, FreePlayConfig, Loadout, MissionId, ModuleKind, SectionId, Selection,
    SessionContext,
};

/// Errors that can occur when loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read catalog file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The catalog parsed but is not playable.
    #[error("invalid catalog: {reason}")]
    Invalid {
        /// What is wrong with the catalog.
        reason: String,
    },
}

impl From<serde_yml::Error> for CatalogError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Errors that can occur when building a loadout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// No section with this id.
    #[error("unknown {0}")]
    UnknownSection(SectionId),

    /// No mission with this id in the selected section.
    #[error("unknown mission '{mission}' in {section}")]
    UnknownMission {
        /// Section that was searched.
        section: SectionId,
        /// Requested mission.
        mission: MissionId,
    },

    /// The session context does not describe a bomb.
    #[error(transparent)]
    Context(#[from] ContextError),
}

/// Factory for bomb loadouts.
///
/// Invoked once the session context is frozen. Implementations must be
/// deterministic for a given context so a session can be replayed.
pub trait MissionLoader: Send + Sync {
    /// Build the loadout described by `context`.
    fn load(&self, context: &SessionContext) -> Result<Loadout, LoadError>;
}

/// One campaign mission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mission {
    /// Stable identifier.
    pub id: MissionId,
    /// Display name.
    pub name: String,
    /// Module variants in addressing order.
    pub modules: Vec<ModuleKind>,
    /// Countdown length in seconds.
    pub time_secs: u64,
    /// Strikes that detonate the bomb.
    pub strike_limit: u32,
    /// Generation seed. Derived from the id when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Mission {
    fn new(
        id: &str,
        name: &str,
        modules: &[ModuleKind],
        time_secs: u64,
        strike_limit: u32,
    ) -> Self {
        Self {
            id: MissionId::new(id),
            name: name.to_string(),
            modules: modules.to_vec(),
            time_secs,
            strike_limit,
            seed: None,
        }
    }

    /// Countdown length.
    pub fn time_budget(&self) -> Duration {
        Duration::from_secs(self.time_secs)
    }

    /// Seed used to generate this mission's modules.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| fnv1a(self.id.0.as_bytes()))
    }
}

/// A group of campaign missions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    /// Stable identifier.
    pub id: SectionId,
    /// Display name.
    pub name: String,
    /// Missions in menu order.
    pub missions: Vec<Mission>,
}

/// All campaign content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    sections: Vec<CatalogSection>,
}

impl Catalog {
    /// Catalog shipped with the trainer.
    pub fn builtin() -> Self {
        use crate::ModuleKind::{Keypad, SimonSays, Wires};

        Self {
            sections: vec![
                CatalogSection {
                    id: SectionId(1),
                    name: "Introduction".to_string(),
                    missions: vec![
                        Mission::new("first-bomb", "The First Bomb", &[Wires], 300, 3),
                        Mission::new(
                            "the-basics",
                            "The Basics",
                            &[Wires, Keypad, SimonSays],
                            300,
                            3,
                        ),
                    ],
                },
                CatalogSection {
                    id: SectionId(2),
                    name: "Getting Started".to_string(),
                    missions: vec![
                        Mission::new(
                            "something-old",
                            "Something Old, Something New",
                            &[Wires, Wires, Keypad, SimonSays],
                            300,
                            3,
                        ),
                        Mission::new(
                            "one-step-up",
                            "One Step Up",
                            &[Keypad, SimonSays, Wires, Keypad, SimonSays],
                            240,
                            3,
                        ),
                    ],
                },
                CatalogSection {
                    id: SectionId(3),
                    name: "Moderate".to_string(),
                    missions: vec![
                        Mission::new(
                            "pick-up-the-pace",
                            "Pick Up the Pace",
                            &[Wires, Keypad, SimonSays, Wires, Keypad, SimonSays],
                            180,
                            3,
                        ),
                        Mission::new(
                            "no-room-for-error",
                            "No Room for Error",
                            &[SimonSays, Keypad, Wires, SimonSays, Keypad, Wires, Wires],
                            300,
                            1,
                        ),
                    ],
                },
            ],
        }
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read,
    /// [`CatalogError::Yaml`] if it is not valid YAML, and
    /// [`CatalogError::Invalid`] if the content is not playable.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate a catalog from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_yml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Sections in menu order.
    pub fn sections(&self) -> &[CatalogSection] {
        &self.sections
    }

    /// Section by id.
    pub fn section(&self, id: SectionId) -> Option<&CatalogSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Mission by section and id.
    pub fn mission(&self, section: SectionId, mission: &MissionId) -> Option<&Mission> {
        self.section(section).and_then(|s| s.missions.iter().find(|m| &m.id == mission))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |reason: String| Err(CatalogError::Invalid { reason });

        if self.sections.is_empty() {
            return invalid("catalog has no sections".to_string());
        }

        let mut section_ids = HashSet::new();
        let mut mission_ids = HashSet::new();
        for section in &self.sections {
            if !section_ids.insert(section.id) {
                return invalid(format!("duplicate {}", section.id));
            }
            if section.missions.is_empty() {
                return invalid(format!("{} has no missions", section.id));
            }
            for mission in &section.missions {
                if !mission_ids.insert(&mission.id) {
                    return invalid(format!("duplicate mission '{}'", mission.id));
                }
                if mission.modules.is_empty() {
                    return invalid(format!("mission '{}' has no modules", mission.id));
                }
                if mission.time_secs == 0 {
                    return invalid(format!("mission '{}' has no time", mission.id));
                }
                if mission.strike_limit == 0 {
                    return invalid(format!("mission '{}' allows no strikes", mission.id));
                }
            }
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Loader backed by a [`Catalog`].
///
/// Campaign missions generate their modules from the mission seed; free-play
/// bombs draw module kinds uniformly from every variant using the config
/// seed.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoader {
    catalog: Catalog,
}

impl CatalogLoader {
    /// Create a loader over `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Underlying catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn campaign(&self, section: SectionId, mission: &MissionId) -> Result<Loadout, LoadError> {
        if self.catalog.section(section).is_none() {
            return Err(LoadError::UnknownSection(section));
        }
        let found = self
            .catalog
            .mission(section, mission)
            .ok_or_else(|| LoadError::UnknownMission { section, mission: mission.clone() })?;

        let mut rng = ChaCha8Rng::seed_from_u64(found.seed());
        Ok(Loadout {
            modules: found.modules.iter().map(|kind| kind.generate(&mut rng)).collect(),
            time_budget: found.time_budget(),
            strike_limit: found.strike_limit,
        })
    }

    fn free_play(config: &FreePlayConfig) -> Result<Loadout, LoadError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let modules = (0..config.module_count)
            .map(|_| {
                let kind = ModuleKind::ALL[rng.gen_range(0..ModuleKind::ALL.len())];
                kind.generate(&mut rng)
            })
            .collect();

        Ok(Loadout { modules, time_budget: config.time_budget, strike_limit: config.strike_limit })
    }
}

impl MissionLoader for CatalogLoader {
    fn load(&self, context: &SessionContext) -> Result<Loadout, LoadError> {
        match context.selection()? {
            Selection::Campaign { section, mission } => self.campaign(section, &mission),
            Selection::FreePlay(config) => Self::free_play(&config),
        }
    }
}

/// 64-bit FNV-1a, used to derive stable seeds from mission ids.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes.iter().fold(OFFSET, |hash, &b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}
