//! Generic runtime for application orchestration.
//!
//! The Runtime drives the event loop, coordinating between:
//! - [`App`]: session state machine
//! - [`Driver`]: platform-specific input, time and rendering
//!
//! Each cycle handles at most one discrete event, then exactly one tick
//! carrying the time measured since the previous tick.

use crate::{App, AppAction, AppEvent, Driver, DriverInput};

/// Generic runtime that orchestrates App and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    last_tick: D::Instant,
}

impl<D: Driver> Runtime<D> {
    /// Create a runtime. Tick measurement starts now.
    pub fn new(driver: D, app: App) -> Self {
        let last_tick = driver.now();
        Self { driver, app, last_tick }
    }

    /// Run the main event loop until the driver asks to quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        self.driver.render(&self.app)?;

        loop {
            let should_quit = self.step().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    pub async fn step(&mut self) -> Result<bool, D::Error> {
        match self.driver.poll_input(&self.app).await? {
            DriverInput::Event(event) => self.dispatch(event)?,
            DriverInput::Quit => return Ok(true),
            DriverInput::Redraw => self.driver.render(&self.app)?,
            DriverInput::Idle => {},
        }

        let now = self.driver.now();
        let elapsed = now - self.last_tick;
        self.last_tick = now;
        self.dispatch(AppEvent::Tick(elapsed))?;

        Ok(false)
    }

    /// Feed one event to the App and execute the resulting actions.
    fn dispatch(&mut self, event: AppEvent) -> Result<(), D::Error> {
        match self.app.handle(event) {
            Ok(actions) => self.process_actions(actions),
            // The App recorded the error on its status line.
            Err(_) => self.driver.render(&self.app),
        }
    }

    /// Process actions returned by the App, including follow-up events.
    fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<(), D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::BuildBomb => match self.app.handle(AppEvent::ConfigBuilt) {
                        Ok(new_actions) => pending_actions.extend(new_actions),
                        Err(e) => {
                            tracing::warn!("Bomb build failed: {e}");
                            self.driver.render(&self.app)?;
                        },
                    },
                    AppAction::StartClock => self.last_tick = self.driver.now(),
                    AppAction::SessionEnded { result } => {
                        tracing::info!(?result, "Session ended");
                    },
                }
            }
        }
        Ok(())
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }
}
