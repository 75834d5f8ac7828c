//! Defusal trainer entry point.
//!
//! # Usage
//!
//! ```bash
//! # Built-in campaign, no logging
//! defuse-tui
//!
//! # Custom campaign, debug log written next to the binary
//! defuse-tui --catalog missions.yaml --log-file defuse.log --log-level debug
//! ```

use std::{fs::File, path::PathBuf, sync::Mutex, time::Duration};

use clap::Parser;
use defuse_app::{App, InputState, Runtime};
use defuse_core::{Catalog, CatalogLoader};
use defuse_tui::TerminalDriver;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Terminal bomb-defusal trainer
#[derive(Parser, Debug)]
#[command(name = "defuse-tui")]
#[command(about = "Defuse bombs made of puzzle modules before the countdown runs out")]
#[command(version)]
struct Args {
    /// Campaign catalog (YAML). Uses the built-in campaign if not provided.
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Longest wait for a key before the countdown is advanced, in milliseconds
    #[arg(long, default_value = "100")]
    tick_ms: u64,

    /// Seed for the first free-play bomb. Random if not provided.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file. The terminal belongs to the UI, so nothing is logged
    /// without one.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        let file = File::create(path)?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .init();
    }

    let catalog = match &args.catalog {
        Some(path) => Catalog::from_file(path)?,
        None => Catalog::builtin(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(sections = catalog.sections().len(), seed, "Defusal trainer starting");

    let app = App::new(Box::new(CatalogLoader::new(catalog.clone())));
    let input = InputState::new(catalog, seed);
    let driver = TerminalDriver::new(input, Duration::from_millis(args.tick_ms))?;

    Runtime::new(driver, app).run().await?;

    tracing::info!("Defusal trainer exiting");
    Ok(())
}
