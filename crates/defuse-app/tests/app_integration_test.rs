//! Integration tests for the session state machine.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - The App is on the expected screen
//! - The bomb counters match what was played
//! - Rejected events left the App untouched

use std::time::Duration;

use defuse_app::{App, AppAction, AppError, AppEvent, AppState, SessionResult};
use defuse_core::{
    BombStatus, CatalogLoader, FreePlayConfig, LoadError, Loadout, LossCause, MissionId,
    MissionLoader, ModuleDisplay, ModuleKind, ModulePuzzle, PuzzleError, PuzzleInput,
    QuickPreset, SectionId, SessionContext, SubmitOutcome,
};

/// Solved by `Press(0)`, failed by any other press.
#[derive(Debug)]
struct Button;

impl ModulePuzzle for Button {
    fn kind(&self) -> ModuleKind {
        ModuleKind::Keypad
    }

    fn display(&self) -> ModuleDisplay {
        ModuleDisplay { title: "button".into(), lines: vec![], choices: vec![], hint: None }
    }

    fn submit(&mut self, input: PuzzleInput) -> Result<SubmitOutcome, PuzzleError> {
        match input {
            PuzzleInput::Press(0) => Ok(SubmitOutcome::Solved),
            PuzzleInput::Press(_) => Ok(SubmitOutcome::Failed),
            other => {
                Err(PuzzleError::UnsupportedInput { kind: ModuleKind::Keypad, input: other.name() })
            },
        }
    }

    fn reset(&mut self) {}
}

/// Three buttons, 300 seconds, three strikes.
struct ButtonLoader;

impl MissionLoader for ButtonLoader {
    fn load(&self, context: &SessionContext) -> Result<Loadout, LoadError> {
        context.selection()?;
        Ok(Loadout {
            modules: (0..3).map(|_| Box::new(Button) as Box<dyn ModulePuzzle>).collect(),
            time_budget: Duration::from_secs(300),
            strike_limit: 3,
        })
    }
}

/// Apply events that must all be accepted, collecting their actions.
fn play(app: &mut App, events: impl IntoIterator<Item = AppEvent>) -> Vec<AppAction> {
    let mut actions = Vec::new();
    for event in events {
        match app.handle(event) {
            Ok(new_actions) => actions.extend(new_actions),
            Err(e) => unreachable!("event rejected in {}: {e}", app.state()),
        }
    }
    actions
}

/// App on the bomb selection screen with three fresh buttons.
fn armed_app() -> App {
    let mut app = App::new(Box::new(ButtonLoader));
    play(&mut app, [
        AppEvent::SelectFreePlay,
        AppEvent::ChooseQuickConfig(FreePlayConfig::preset(QuickPreset::Easy, 1)),
        AppEvent::ConfigBuilt,
    ]);
    assert_eq!(app.state(), AppState::BombSelection);
    app
}

fn answer(app: &mut App, module: usize, button: usize) {
    play(app, [AppEvent::SelectModule(module), AppEvent::SubmitAnswer(PuzzleInput::Press(button))]);
}

#[test]
fn solving_every_module_wins_on_next_tick() {
    let mut app = armed_app();
    for module in 0..3 {
        answer(&mut app, module, 0);
    }
    assert_eq!(app.bomb().map(|b| b.status()), Some(BombStatus::Defused));
    assert_eq!(app.state(), AppState::BombView);

    let actions = play(&mut app, [AppEvent::Tick(Duration::from_millis(100))]);

    assert_eq!(app.state(), AppState::GameOver);
    assert!(actions.contains(&AppAction::SessionEnded { result: SessionResult::Win }));
    let summary = app.summary().copied();
    assert_eq!(summary.map(|s| (s.solved, s.total, s.strikes)), Some((3, 3, 0)));
}

#[test]
fn third_strike_explodes_immediately_and_loses_on_next_tick() {
    let mut app = armed_app();
    answer(&mut app, 0, 1);
    answer(&mut app, 1, 2);
    assert_eq!(app.bomb().map(|b| b.status()), Some(BombStatus::Arming));

    answer(&mut app, 2, 1);
    assert_eq!(app.bomb().map(|b| b.status()), Some(BombStatus::Exploded));
    assert_eq!(app.bomb().map(|b| b.remaining()), Some(Duration::from_secs(300)));

    play(&mut app, [AppEvent::Tick(Duration::ZERO)]);
    assert_eq!(app.state(), AppState::GameOver);
    assert_eq!(
        app.summary().map(|s| s.result),
        Some(SessionResult::Loss(LossCause::StrikeLimit))
    );
}

#[test]
fn exploded_bomb_refuses_to_reopen_modules() {
    let mut app = armed_app();
    for module in 0..3 {
        answer(&mut app, module, 1);
    }
    assert_eq!(app.bomb().map(|b| b.status()), Some(BombStatus::Exploded));
    assert_eq!(app.state(), AppState::BombView);

    assert_eq!(
        app.handle(AppEvent::SelectModule(1)),
        Err(AppError::InvalidTransition { state: AppState::BombView, event: "select-module" })
    );
    assert_eq!(app.state(), AppState::BombView);
    assert_eq!(app.addressed(), Some(2));

    play(&mut app, [AppEvent::Tick(Duration::ZERO)]);
    assert_eq!(app.state(), AppState::GameOver);
}

#[test]
fn defused_bomb_refuses_to_reopen_modules() {
    let mut app = armed_app();
    for module in 0..3 {
        answer(&mut app, module, 0);
    }
    play(&mut app, [AppEvent::Back]);
    assert_eq!(app.state(), AppState::BombSelection);

    let result = app.handle(AppEvent::SelectModule(0));
    assert!(matches!(result, Err(AppError::InvalidTransition { .. })));
    assert_eq!(app.state(), AppState::BombSelection);

    play(&mut app, [AppEvent::Tick(Duration::from_millis(10))]);
    assert_eq!(app.summary().map(|s| s.result), Some(SessionResult::Win));
}

#[test]
fn exhausted_time_budget_explodes_without_strikes() {
    let mut app = armed_app();
    let actions = play(&mut app, [AppEvent::Tick(Duration::from_secs(300))]);

    assert_eq!(app.state(), AppState::GameOver);
    assert_eq!(actions.first(), Some(&AppAction::SessionEnded {
        result: SessionResult::Loss(LossCause::TimeExpired)
    }));
    assert_eq!(app.summary().map(|s| s.strikes), Some(0));
}

#[test]
fn out_of_range_module_is_rejected_in_place() {
    let mut app = armed_app();
    let before = app.snapshot();

    assert_eq!(
        app.handle(AppEvent::SelectModule(5)),
        Err(AppError::OutOfRange { index: 5, len: 3 })
    );
    assert_eq!(app.state(), AppState::BombSelection);
    assert_eq!(app.snapshot().bomb, before.bomb);
}

#[test]
fn game_over_accepts_only_reset() {
    let mut app = armed_app();
    play(&mut app, [AppEvent::Tick(Duration::from_secs(301))]);
    assert_eq!(app.state(), AppState::GameOver);

    let rejected = [
        AppEvent::SelectCampaign,
        AppEvent::SelectFreePlay,
        AppEvent::ChooseSection(SectionId(1)),
        AppEvent::ChooseMission(MissionId::new("first-bomb")),
        AppEvent::ChooseQuickConfig(FreePlayConfig::preset(QuickPreset::Easy, 1)),
        AppEvent::OpenAdvanced,
        AppEvent::ConfirmConfig(FreePlayConfig::preset(QuickPreset::Easy, 1)),
        AppEvent::ConfigBuilt,
        AppEvent::SelectModule(0),
        AppEvent::SubmitAnswer(PuzzleInput::Press(0)),
        AppEvent::Back,
        AppEvent::Cancel,
    ];
    for event in rejected {
        let name = event.name();
        assert_eq!(
            app.handle(event),
            Err(AppError::InvalidTransition { state: AppState::GameOver, event: name })
        );
        assert_eq!(app.state(), AppState::GameOver);
    }

    play(&mut app, [AppEvent::Reset]);
    assert_eq!(app.state(), AppState::MainMenu);
    assert!(app.bomb().is_none());
    assert_eq!(app.context(), &SessionContext::new());
}

#[test]
fn solve_before_tick_beats_expiring_clock() {
    let mut app = armed_app();
    answer(&mut app, 0, 0);
    answer(&mut app, 1, 0);
    play(&mut app, [AppEvent::Tick(Duration::from_millis(299_900))]);
    answer(&mut app, 2, 0);

    // The cycle's tick would exhaust the budget, but the bomb is already defused.
    play(&mut app, [AppEvent::Tick(Duration::from_secs(1))]);
    assert_eq!(app.summary().map(|s| s.result), Some(SessionResult::Win));
}

#[test]
fn final_solve_with_strikes_to_spare_wins() {
    let mut app = armed_app();
    answer(&mut app, 0, 1);
    answer(&mut app, 0, 2);
    for module in 0..3 {
        answer(&mut app, module, 0);
    }
    assert_eq!(app.bomb().map(|b| (b.status(), b.strikes())), Some((BombStatus::Defused, 2)));

    play(&mut app, [AppEvent::Tick(Duration::from_secs(1))]);
    assert_eq!(app.summary().map(|s| s.result), Some(SessionResult::Win));
}

#[test]
fn answering_a_solved_module_is_invalid() {
    let mut app = armed_app();
    answer(&mut app, 0, 0);
    play(&mut app, [AppEvent::SelectModule(0)]);

    let result = app.handle(AppEvent::SubmitAnswer(PuzzleInput::Press(1)));
    assert!(matches!(result, Err(AppError::InvalidEvent { .. })));
    assert_eq!(app.bomb().map(|b| b.strikes()), Some(0));
    assert_eq!(app.state(), AppState::ModuleActive);
}

#[test]
fn bomb_view_reopens_modules_and_backs_out() {
    let mut app = armed_app();
    answer(&mut app, 1, 0);
    assert_eq!(app.last_outcome(), Some(SubmitOutcome::Solved));

    play(&mut app, [AppEvent::SelectModule(2)]);
    assert_eq!(app.state(), AppState::ModuleActive);
    assert_eq!(app.addressed(), Some(2));

    play(&mut app, [AppEvent::Back]);
    assert_eq!(app.state(), AppState::BombSelection);
}

#[test]
fn campaign_mission_loads_from_catalog() {
    let mut app = App::new(Box::new(CatalogLoader::default()));
    let actions = play(&mut app, [
        AppEvent::SelectCampaign,
        AppEvent::ChooseSection(SectionId(1)),
        AppEvent::ChooseMission(MissionId::new("the-basics")),
    ]);
    assert_eq!(actions.last(), Some(&AppAction::BuildBomb));

    play(&mut app, [AppEvent::ConfigBuilt]);
    let kinds: Vec<_> = app
        .snapshot()
        .bomb
        .map(|view| view.modules.iter().map(|m| m.kind).collect())
        .unwrap_or_default();
    assert_eq!(kinds, [ModuleKind::Wires, ModuleKind::Keypad, ModuleKind::SimonSays]);
}

#[test]
fn unknown_mission_fails_to_load_until_cancelled() {
    let mut app = App::new(Box::new(CatalogLoader::default()));
    play(&mut app, [
        AppEvent::SelectCampaign,
        AppEvent::ChooseSection(SectionId(1)),
        AppEvent::ChooseMission(MissionId::new("no-such-mission")),
    ]);

    for _ in 0..2 {
        assert!(matches!(app.handle(AppEvent::ConfigBuilt), Err(AppError::LoadFailure { .. })));
        assert_eq!(app.state(), AppState::Loading);
    }
    assert!(app.status_message().is_some_and(|m| m.contains("no-such-mission")));

    play(&mut app, [AppEvent::Cancel]);
    assert_eq!(app.state(), AppState::MainMenu);
}

#[test]
fn frozen_context_survives_loading() {
    let mut app = App::new(Box::new(ButtonLoader));
    play(&mut app, [
        AppEvent::SelectFreePlay,
        AppEvent::OpenAdvanced,
        AppEvent::ConfirmConfig(FreePlayConfig::preset(QuickPreset::Hard, 9)),
    ]);
    assert!(app.context().is_frozen());

    // Menu events no longer apply once loading started.
    assert!(matches!(
        app.handle(AppEvent::ChooseQuickConfig(FreePlayConfig::preset(QuickPreset::Easy, 1))),
        Err(AppError::InvalidTransition { state: AppState::Loading, .. })
    ));
    assert_eq!(app.context().free_play().map(|c| c.module_count), Some(8));
}
