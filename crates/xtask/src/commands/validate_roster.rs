//! Audit a roster for content errors
//!
//! Parses `characters.ron` (and `arena.toml` when present) and reports every
//! [`RosterIssue`]. Exits non-zero when any issue is an error.

use anyhow::Result;
use clap::Parser;
use console::style;
use std::path::PathBuf;

use arena_content::{ContentFactory, IssueLevel, RosterIssue, audit_roster};

/// Audit a roster file for content errors
#[derive(Parser, Debug)]
pub struct ValidateRoster {
    /// Content directory holding characters.ron
    /// (defaults to the bundled data set)
    #[arg(short, long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    strict: bool,
}

impl ValidateRoster {
    pub fn execute(self) -> Result<()> {
        let factory = match &self.data {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };

        println!(
            "{} {}",
            style("Content:").bold().cyan(),
            factory.data_dir().display()
        );

        let roster = factory.load_roster()?;
        factory.load_config()?;
        let issues = audit_roster(&roster);

        println!(
            "{} {} characters, {} starters",
            style("Roster:").bold().cyan(),
            roster.len(),
            roster.starters().count()
        );
        println!();

        for issue in &issues {
            print_issue(issue);
        }

        let failing = issues
            .iter()
            .filter(|issue| self.strict || issue.level() == IssueLevel::Error)
            .count();

        if issues.is_empty() {
            println!("{}", style("✓ No issues found").green().bold());
        } else {
            println!();
            println!("{} issue(s), {} failing", issues.len(), failing);
        }

        if failing > 0 {
            anyhow::bail!("Roster validation failed with {failing} failing issue(s)");
        }
        Ok(())
    }
}

fn print_issue(issue: &RosterIssue) {
    let label = match issue.level() {
        IssueLevel::Error => style("error").red().bold(),
        IssueLevel::Warning => style("warning").yellow().bold(),
    };
    println!("  {label}: {issue}");
}
