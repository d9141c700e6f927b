//! Read and inspect persisted matches
//!
//! Loads `state.json` and `turns.jsonl` through [`FileMatchRepo`], which also
//! verifies the stored state root.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use arena_runtime::{FileMatchRepo, MatchRepository};

use super::{describe_winner, print_log, print_teams};
use crate::dirs;

/// Read and inspect a persisted match
#[derive(Parser)]
pub struct ReadMatch {
    /// Match to read; lists stored matches when omitted
    #[arg(value_name = "MATCH_ID")]
    match_id: Option<String>,

    /// Directory holding saved matches (defaults to the platform data directory)
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Teams, phase and winner
    Summary,
    /// Every resolved turn log followed by the summary
    Log,
    /// Full JSON state
    Json,
}

impl ReadMatch {
    pub fn execute(self) -> Result<()> {
        let dir = dirs::match_dir_or(self.dir);
        if !dir.exists() {
            anyhow::bail!("Match directory not found: {}", dir.display());
        }
        let repo = FileMatchRepo::new(&dir)
            .with_context(|| format!("Failed to open match directory: {}", dir.display()))?;

        let Some(match_id) = self.match_id else {
            let matches = repo.list_matches()?;
            if matches.is_empty() {
                println!("{}", style("No saved matches").dim());
            }
            for id in matches {
                println!("  {} {}", style("→").cyan(), id);
            }
            return Ok(());
        };

        let state = repo
            .load_state(&match_id)
            .with_context(|| format!("Failed to load match '{match_id}'"))?
            .with_context(|| format!("Match not found: {match_id}"))?;

        if let OutputFormat::Json = self.format {
            println!(
                "{}",
                serde_json::to_string_pretty(&state).context("Failed to serialize state to JSON")?
            );
            return Ok(());
        }

        println!("{} {}", style("Match:").bold().cyan(), match_id);
        println!("{} {}", style("Seed:").bold().cyan(), state.seed);
        println!(
            "{} {} ({})",
            style("Turn:").bold().cyan(),
            state.turn,
            state.phase
        );
        println!(
            "{} {}",
            style("State root:").bold().cyan(),
            hex::encode(state.state_root())
        );
        println!();

        if let OutputFormat::Log = self.format {
            for record in repo.load_turns(&match_id)? {
                print_log(record.turn, &record.log);
            }
            println!();
        }

        print_teams(&state);
        println!();
        println!(
            "{} {}",
            style("Winner:").bold().green(),
            describe_winner(&state)
        );

        Ok(())
    }
}
