//! Delete persisted matches
//!
//! Safety: Always prompts for confirmation before deletion.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;

use arena_runtime::{FileMatchRepo, MatchRepository};

use crate::dirs;

/// Delete persisted matches
#[derive(Parser, Debug)]
pub struct Clean {
    /// Specific match to delete (all matches when omitted)
    #[arg(value_name = "MATCH_ID")]
    pub match_id: Option<String>,

    /// Directory holding saved matches (defaults to the platform data directory)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Skip confirmation prompt (dangerous!)
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl Clean {
    pub fn execute(self) -> Result<()> {
        let dir = dirs::match_dir_or(self.dir.clone());
        if !dir.exists() {
            println!(
                "{}",
                style("Nothing to clean - match directory doesn't exist yet").dim()
            );
            return Ok(());
        }

        let repo = FileMatchRepo::new(&dir)?;
        let targets = match &self.match_id {
            Some(id) => {
                if !repo.exists(id) {
                    anyhow::bail!("Match not found: {id}");
                }
                vec![id.clone()]
            }
            None => repo.list_matches()?,
        };

        if targets.is_empty() {
            println!("{}", style("Nothing to clean - no saved matches").dim());
            return Ok(());
        }

        println!("{}", style("Clean saved matches").yellow().bold());
        println!();
        println!("The following will be deleted from {}:", dir.display());
        for id in &targets {
            println!("  {} {}", style("→").cyan(), style(id).bold());
        }
        println!();

        if !self.yes && !confirm()? {
            println!("{}", style("Cancelled").dim());
            return Ok(());
        }

        for id in targets {
            print!("Deleting {id}... ");
            io::stdout().flush()?;
            repo.delete(&id)
                .with_context(|| format!("Failed to delete match '{id}'"))?;
            println!("{}", style("✓").green());
        }

        println!();
        println!("{}", style("✓ Cleanup complete!").green().bold());

        Ok(())
    }
}

/// Prompt user for confirmation
fn confirm() -> Result<bool> {
    print!("{} ", style("Proceed? [y/N]").yellow().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
