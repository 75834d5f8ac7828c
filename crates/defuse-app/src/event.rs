//! Application input events.
//!
//! [`AppEvent`] is the single queue item type driving the [`crate::App`]
//! state machine. Discrete player input and clock ticks share it; the
//! runtime delivers at most one discrete event and one tick per cycle.

use std::time::Duration;

use defuse_core::{FreePlayConfig, MissionId, PuzzleInput, SectionId};

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Main menu: start a campaign.
    SelectCampaign,

    /// Main menu: start free play.
    SelectFreePlay,

    /// Pick a campaign section.
    ChooseSection(SectionId),

    /// Pick a mission of the chosen section.
    ChooseMission(MissionId),

    /// Pick a quick free-play configuration.
    ChooseQuickConfig(FreePlayConfig),

    /// Open the free-play editor.
    OpenAdvanced,

    /// Confirm the edited free-play configuration.
    ConfirmConfig(FreePlayConfig),

    /// Build the bomb from the frozen context.
    ConfigBuilt,

    /// Address a module by index.
    SelectModule(usize),

    /// Answer the addressed module.
    SubmitAnswer(PuzzleInput),

    /// Navigate one screen back.
    Back,

    /// Return from GameOver to the main menu.
    Reset,

    /// Abandon loading.
    Cancel,

    /// Time passed since the previous tick.
    Tick(Duration),
}

impl AppEvent {
    /// Event name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectCampaign => "select-campaign",
            Self::SelectFreePlay => "select-free-play",
            Self::ChooseSection(_) => "choose-section",
            Self::ChooseMission(_) => "choose-mission",
            Self::ChooseQuickConfig(_) => "choose-quick-config",
            Self::OpenAdvanced => "open-advanced",
            Self::ConfirmConfig(_) => "confirm-config",
            Self::ConfigBuilt => "config-built",
            Self::SelectModule(_) => "select-module",
            Self::SubmitAnswer(_) => "submit-answer",
            Self::Back => "back",
            Self::Reset => "reset",
            Self::Cancel => "cancel",
            Self::Tick(_) => "tick",
        }
    }
}
