//! Command-line driver for the LUMOS guidance engine.
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Hint, Play, Route, Stages, Walk};
use config::CliConfig;
use std::path::PathBuf;

/// LUMOS labyrinth guide
#[derive(Parser)]
#[command(name = "lumos")]
#[command(about = "Routes, hints and sessions for the LUMOS labyrinth", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory with labyrinth.ron and config.toml (defaults to bundled content)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed for session randomness
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Find the cheapest route between two locations
    Route(Route),

    /// Show how difficulty scales with puzzle progress
    Stages(Stages),

    /// Ask the guide for a hint at a location
    Hint(Hint),

    /// Walk through a list of locations and print what happens
    Walk(Walk),

    /// Play an interactive session on stdin
    Play(Play),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::from_env().with_overrides(cli.data_dir, cli.seed);

    match cli.command {
        Command::Route(cmd) => cmd.execute(&config),
        Command::Stages(cmd) => cmd.execute(),
        Command::Hint(cmd) => cmd.execute(&config),
        Command::Walk(cmd) => cmd.execute(&config),
        Command::Play(cmd) => cmd.execute(&config),
    }
}
