//! High-level runtime orchestrator.
//!
//! The runtime owns the resolution worker, wires up command/event channels,
//! and exposes a builder-based API for servers and simulators to drive a match.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use arena_core::{
    ArenaConfig, ArenaEnv, MatchState, PcgRng, RngOracle, Roster, TeamSide, TeamSpec, initialize,
};

use crate::api::{
    ActionProvider, MatchEvent, MatchHandle, Result, RuntimeError, SubmitOutcome,
};
use crate::repository::{FileMatchRepo, InMemoryMatchRepo, MatchRepository};
use crate::workers::{Command, ResolutionWorker, WorkerContext};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub arena: ArenaConfig,
    /// Key under which the match is persisted.
    pub match_id: String,
    /// Match seed for every engine draw.
    pub seed: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Persist to JSON files under this directory instead of memory.
    pub persistence_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            match_id: "match".to_owned(),
            seed: 0,
            event_buffer_size: 100,
            command_buffer_size: 32,
            persistence_dir: None,
        }
    }
}

/// Main runtime that orchestrates one match.
///
/// [`MatchHandle`] provides a cloneable façade for clients. Providers are
/// optional: a server feeds submissions through the handle, a simulator sets
/// both providers and calls [`ArenaRuntime::step`].
pub struct ArenaRuntime {
    handle: MatchHandle,
    providers: [Option<Box<dyn ActionProvider>>; 2],
    worker: JoinHandle<()>,
}

impl ArenaRuntime {
    /// Create a new runtime builder
    pub fn builder() -> ArenaRuntimeBuilder {
        ArenaRuntimeBuilder::new()
    }

    /// Start a fresh match between two lineups with in-memory persistence.
    pub async fn start(
        config: RuntimeConfig,
        roster: Roster,
        team_a: TeamSpec,
        team_b: TeamSpec,
    ) -> Result<Self> {
        Self::builder()
            .config(config)
            .roster(roster)
            .teams(team_a, team_b)
            .build()
            .await
    }

    /// Get a cloneable handle to this match
    pub fn handle(&self) -> MatchHandle {
        self.handle.clone()
    }

    /// Subscribe to match events
    pub fn subscribe(&self) -> broadcast::Receiver<MatchEvent> {
        self.handle.subscribe()
    }

    /// Set the action provider for one side
    pub fn set_provider(&mut self, side: TeamSide, provider: impl ActionProvider + 'static) {
        self.providers[provider_slot(side)] = Some(Box::new(provider));
    }

    /// Plan and submit one turn for both sides.
    ///
    /// Requires both providers to be configured. Returns the outcome of the
    /// second submission, which is the one that resolves the turn.
    pub async fn step(&mut self) -> Result<SubmitOutcome> {
        let state = self.handle.state().await?;

        let mut outcome = SubmitOutcome::Waiting;
        for side in TeamSide::BOTH {
            let provider = self.providers[provider_slot(side)]
                .as_ref()
                .ok_or(RuntimeError::ProviderNotSet { side })?;
            let submission = provider.provide(side, &state).await?;
            outcome = self.handle.submit(side, submission).await?;
        }

        Ok(outcome)
    }

    /// Step until the match finishes or `max_turns` turns have been resolved.
    ///
    /// Returns the final state either way.
    pub async fn run(&mut self, max_turns: u32) -> Result<MatchState> {
        for _ in 0..max_turns {
            if let SubmitOutcome::Resolved {
                winner: Some(_), ..
            } = self.step().await?
            {
                break;
            }
        }
        self.handle.state().await
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding [`MatchHandle`] clone is dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        drop(self.providers);

        self.worker.await.map_err(RuntimeError::WorkerJoin)
    }
}

const fn provider_slot(side: TeamSide) -> usize {
    match side {
        TeamSide::A => 0,
        TeamSide::B => 1,
    }
}

/// Builder for [`ArenaRuntime`] with flexible configuration.
pub struct ArenaRuntimeBuilder {
    config: RuntimeConfig,
    roster: Option<Roster>,
    teams: Option<(TeamSpec, TeamSpec)>,
    state: Option<MatchState>,
    resume: bool,
    rng: Option<Box<dyn RngOracle>>,
    repository: Option<Arc<dyn MatchRepository>>,
    providers: [Option<Box<dyn ActionProvider>>; 2],
}

impl ArenaRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            roster: None,
            teams: None,
            state: None,
            resume: false,
            rng: None,
            repository: None,
            providers: [None, None],
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the character catalogue (required)
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Lineups for a fresh match
    pub fn teams(mut self, team_a: TeamSpec, team_b: TeamSpec) -> Self {
        self.teams = Some((team_a, team_b));
        self
    }

    /// Continue from an explicit state instead of initializing
    pub fn initial_state(mut self, state: MatchState) -> Self {
        self.state = Some(state);
        self
    }

    /// Continue from the repository's saved state for the configured match id,
    /// falling back to the lineups when nothing is saved
    pub fn resume(mut self) -> Self {
        self.resume = true;
        self
    }

    /// Replace the default PCG random source
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Set a custom repository. Overrides `persistence_dir`.
    pub fn repository(mut self, repository: Arc<dyn MatchRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set one side's action provider (optional)
    pub fn provider(mut self, side: TeamSide, provider: impl ActionProvider + 'static) -> Self {
        self.providers[provider_slot(side)] = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<ArenaRuntime> {
        let roster = self.roster.ok_or(RuntimeError::MissingTeams)?;
        let rng = self.rng.unwrap_or_else(|| Box::new(PcgRng));
        let config = self.config;

        let repository: Arc<dyn MatchRepository> = match (self.repository, &config.persistence_dir)
        {
            (Some(repository), _) => repository,
            (None, Some(dir)) => Arc::new(FileMatchRepo::new(dir)?),
            (None, None) => Arc::new(InMemoryMatchRepo::new()),
        };

        let saved = if self.state.is_none() && self.resume {
            repository.load_state(&config.match_id)?
        } else {
            None
        };

        let state = match (self.state.or(saved), self.teams) {
            (Some(state), _) => state,
            (None, Some((team_a, team_b))) => {
                let env = ArenaEnv::new(&roster, &*rng, &config.arena);
                let state = initialize(&env, config.seed, &team_a, &team_b)?;
                repository.save_state(&config.match_id, &state)?;
                state
            }
            (None, None) => return Err(RuntimeError::MissingTeams),
        };

        info!(
            match_id = %config.match_id,
            turn = state.turn,
            seed = state.seed,
            "starting match runtime"
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size);
        let (event_tx, _event_rx) = broadcast::channel::<MatchEvent>(config.event_buffer_size);

        let handle = MatchHandle::new(&config.match_id, command_tx, event_tx.clone());

        let worker = ResolutionWorker::new(
            config.match_id.clone(),
            state,
            WorkerContext {
                roster,
                config: config.arena,
                rng,
            },
            repository,
            command_rx,
            event_tx,
        );

        let worker = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(ArenaRuntime {
            handle,
            providers: self.providers,
            worker,
        })
    }
}
