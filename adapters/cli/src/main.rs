#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays scripted events against the snake engine.

mod replay;
mod report;
mod script;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use snake_engine::EngineConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Replays a script of inbound events and prints what every port receives.
#[derive(Debug, Parser)]
#[command(name = "snake-replay", version)]
struct Args {
    /// Engine configuration, e.g. "W 10 10 F 5 5 S R 3 2 2 1 2 0 2".
    #[arg(long, required_unless_present = "config_file", conflicts_with = "config_file")]
    config: Option<String>,
    /// File holding the engine configuration.
    #[arg(long)]
    config_file: Option<PathBuf>,
    /// Script with one event per line.
    #[arg(long)]
    script: PathBuf,
}

/// Entry point for the snake replay command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let source = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let steps = script::parse(&source).context("failed to parse script")?;
    info!(steps = steps.len(), config = %config, "replaying script");

    replay::run(config, &steps, &mut std::io::stdout().lock())
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let text = match (&args.config, &args.config_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?,
        (None, None) => anyhow::bail!("either --config or --config-file is required"),
    };
    text.parse::<EngineConfig>()
        .with_context(|| format!("invalid configuration '{}'", text.trim()))
}
