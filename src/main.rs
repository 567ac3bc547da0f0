//! Strictly Concentration - Unified CLI

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::time::Duration;
use strictly_concentration::{PlayMode, Settings, run_tui, run_tui_with_think, simulate};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(seed) = cli.seed {
        settings = settings.with_seed(Some(seed));
    }

    match cli.command {
        Command::Play { columns } => {
            if let Some(columns) = columns {
                settings = settings.with_columns(columns);
            }
            settings.validate().context("Invalid settings")?;
            run_tui(settings, PlayMode::Human).await
        }
        Command::Watch { think_ms } => {
            run_tui_with_think(settings, PlayMode::Watch, Duration::from_millis(think_ms)).await
        }
        Command::Simulate { games, json } => run_simulation(settings, games, json),
    }
}

/// Play headless games and print the report
fn run_simulation(settings: Settings, games: u64, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(games, "Starting simulation");
    let config = settings.game_config().context("Invalid settings")?;
    let report = simulate(&config, games)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
