//! Match orchestration around the deterministic arena engine.
//!
//! This crate wires together submission validation, the action provider
//! abstraction, repositories, and the resolution worker into a cohesive
//! runtime API. Servers embed [`ArenaRuntime`] to run a match, feed each
//! side's plan through [`MatchHandle`], and subscribe to [`MatchEvent`]s.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`providers`] holds automated planners
//! - [`repository`] persists match progress
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod providers;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{
    ActionProvider, MatchEvent, MatchHandle, PassActionProvider, Result, RuntimeError,
    ScriptedActionProvider, Submission, SubmissionError, SubmitOutcome, validate_submission,
};
pub use providers::RandomActionProvider;
pub use repository::{
    FileMatchRepo, InMemoryMatchRepo, MatchRepository, RepositoryError, TurnRecord,
};
pub use runtime::{ArenaRuntime, ArenaRuntimeBuilder, RuntimeConfig};
