//! Tally command-line front end.
//!
//! Loads configuration, opens the book from the configured data directory
//! and runs one command against it.

mod args;
mod commands;
mod render;
mod resolve;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::snapshot::FileSnapshotStore;
use tally_core::{Book, LoadOutcome};
use tally_shared::config::LoggingConfig;
use tally_shared::{AppConfig, AppError};

use crate::args::Cli;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load().map_err(AppError::from)?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    init_tracing(&config.logging, cli.json_logs || config.logging.json);
    debug!(data_dir = %config.storage.data_dir.display(), "Configuration loaded");

    let store = FileSnapshotStore::from_config(&config.storage);
    let (mut book, outcome) = Book::open(Box::new(store));
    match &outcome {
        LoadOutcome::Recovered(err) => {
            eprintln!("warning: saved data could not be read ({err}); starting with default accounts");
        }
        LoadOutcome::Seeded => info!("Starting a new book"),
        LoadOutcome::Loaded { .. } => {}
    }

    let today = chrono::Local::now().date_naive();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(&mut book, cli.command, today, &mut out)?;
    out.flush()?;
    Ok(())
}

fn init_tracing(config: &LoggingConfig, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}
