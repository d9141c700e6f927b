//! Development tasks for the arena workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Clean, ReadMatch, Simulate, ValidateRoster};

/// Development tasks for the arena workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the arena engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play a full match between two AI-controlled teams
    Simulate(Simulate),

    /// Audit a roster file for content errors
    ValidateRoster(ValidateRoster),

    /// Inspect a persisted match
    ReadMatch(ReadMatch),

    /// Delete persisted matches
    Clean(Clean),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for ARENA_MATCH_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::ValidateRoster(cmd) => cmd.execute(),
        Command::ReadMatch(cmd) => cmd.execute(),
        Command::Clean(cmd) => cmd.execute(),
    }
}
