mod config;
mod error;
mod scenario;
mod surface;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::AppError;
use crate::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "dragboard", about = "Replay drag-and-drop scenarios against drop zones")]
struct Cli {
    /// Scenario JSON file describing zones and drags.
    #[arg(long, env = "DRAGBOARD_SCENARIO")]
    scenario: PathBuf,

    /// Pretty-print the report.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let raw = std::fs::read_to_string(&cli.scenario)
        .map_err(|source| AppError::Io { path: cli.scenario.clone(), source })?;
    let scenario = Scenario::from_json(&raw)?;
    tracing::info!(
        path = %cli.scenario.display(),
        zones = scenario.zones.len(),
        drags = scenario.drags.len(),
        channel = %config.channel,
        "scenario loaded"
    );

    let report = scenario::run(&scenario, &config)?;
    let out = if cli.pretty { serde_json::to_string_pretty(&report)? } else { serde_json::to_string(&report)? };
    println!("{out}");
    Ok(())
}
