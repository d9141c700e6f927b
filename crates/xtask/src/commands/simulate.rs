//! Play a complete match between two AI-controlled teams
//!
//! Loads a roster, drives the resolution worker with a
//! [`RandomActionProvider`] on each side, and prints every resolved turn.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use arena_content::ContentFactory;
use arena_core::{CharacterId, Roster, TeamSide, TeamSpec};
use arena_runtime::{ArenaRuntime, MatchEvent, RandomActionProvider, RuntimeConfig};

use super::{describe_winner, print_log, print_teams};
use crate::dirs;

/// Play a full match between two AI-controlled teams
#[derive(Parser, Debug)]
pub struct Simulate {
    /// Content directory holding characters.ron and arena.toml
    /// (defaults to the bundled data set)
    #[arg(short, long, value_name = "DIR")]
    data: Option<PathBuf>,

    /// Character ids for team A, comma separated
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    team_a: Vec<String>,

    /// Character ids for team B, comma separated
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    team_b: Vec<String>,

    /// Match seed
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Stop after this many turns even without a winner
    #[arg(long, default_value_t = 60)]
    max_turns: u32,

    /// Emit a JSON summary instead of the turn-by-turn log
    #[arg(long)]
    json: bool,

    /// Persist the match so `read-match` can inspect it
    #[arg(long)]
    save: bool,

    /// Match identifier used when saving
    #[arg(long, default_value = "simulation")]
    match_id: String,

    /// Directory for saved matches (defaults to the platform data directory)
    #[arg(long, value_name = "DIR")]
    match_dir: Option<PathBuf>,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        tokio::runtime::Runtime::new()?.block_on(self.execute_async())
    }

    async fn execute_async(self) -> Result<()> {
        let factory = match &self.data {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        };
        let roster = factory.load_roster()?;
        let arena = factory.load_config()?;
        let (team_a, team_b) = self.teams(&roster)?;

        let persistence_dir = self
            .save
            .then(|| dirs::match_dir_or(self.match_dir.clone()));
        let config = RuntimeConfig {
            arena,
            match_id: self.match_id.clone(),
            seed: self.seed,
            // Four events per turn at most: two submissions, the resolution, the finish.
            event_buffer_size: (self.max_turns as usize * 4).max(100),
            persistence_dir: persistence_dir.clone(),
            ..RuntimeConfig::default()
        };

        let mut runtime = ArenaRuntime::builder()
            .config(config)
            .roster(roster)
            .teams(team_a, team_b)
            .provider(TeamSide::A, RandomActionProvider::new(ai_seed(self.seed, 1)))
            .provider(TeamSide::B, RandomActionProvider::new(ai_seed(self.seed, 2)))
            .build()
            .await
            .context("Failed to start match")?;
        let mut events = runtime.subscribe();

        let state = runtime.run(self.max_turns).await?;
        runtime.shutdown().await?;

        if self.json {
            let summary = serde_json::json!({
                "seed": self.seed,
                "turn": state.turn,
                "phase": state.phase.to_string(),
                "winner": state.winner,
                "state_root": hex::encode(state.state_root()),
                "state": state,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        while let Ok(event) = events.try_recv() {
            if let MatchEvent::TurnResolved { turn, log, .. } = event {
                print_log(turn, &log);
            }
        }

        println!();
        print_teams(&state);
        println!();
        println!(
            "{} {} (turn {}, phase {})",
            style("Winner:").bold().green(),
            describe_winner(&state),
            state.turn,
            state.phase
        );
        println!(
            "{} {}",
            style("State root:").bold().cyan(),
            hex::encode(state.state_root())
        );
        if let Some(dir) = persistence_dir {
            println!(
                "{} {}",
                style("Saved to:").bold().cyan(),
                dir.join(&self.match_id).display()
            );
        }

        Ok(())
    }

    /// Explicit lineups win; otherwise the first six starters are split.
    fn teams(&self, roster: &Roster) -> Result<(TeamSpec, TeamSpec)> {
        let starters: Vec<CharacterId> = roster.starters().map(|c| c.id.clone()).collect();
        let pick = |explicit: &[String], offset: usize| -> Result<Vec<CharacterId>> {
            if !explicit.is_empty() {
                return Ok(explicit.iter().map(|id| CharacterId::new(id.as_str())).collect());
            }
            starters
                .get(offset..offset + 3)
                .map(<[CharacterId]>::to_vec)
                .with_context(|| {
                    format!(
                        "Roster has only {} starters; pass --team-a/--team-b explicitly",
                        starters.len()
                    )
                })
        };

        Ok((
            TeamSpec::new("ai-a", pick(&self.team_a, 0)?),
            TeamSpec::new("ai-b", pick(&self.team_b, 3)?),
        ))
    }
}

fn ai_seed(seed: u64, side: u64) -> u64 {
    seed.rotate_left(17) ^ side.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
