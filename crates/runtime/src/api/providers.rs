//! Asynchronous abstraction for sourcing each side's plan.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a match can
//! run with human input, scripted fixtures, or AI policies.
use async_trait::async_trait;

use arena_core::{MatchState, TeamSide};

use super::errors::Result;
use super::submission::Submission;

/// Trait for providing a side's submission based on the current match state.
///
/// Different implementations can handle:
/// - Player input (from a UI or socket)
/// - AI decisions
/// - Scripted/replayed plans
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Plan `side`'s turn from a read-only snapshot of the planning state.
    async fn provide(&self, side: TeamSide, state: &MatchState) -> Result<Submission>;
}

/// A provider that always passes. Useful for testing or as a fallback.
pub struct PassActionProvider;

#[async_trait]
impl ActionProvider for PassActionProvider {
    async fn provide(&self, _side: TeamSide, _state: &MatchState) -> Result<Submission> {
        Ok(Submission::pass())
    }
}

/// Replays a fixed script, one submission per turn, then passes.
pub struct ScriptedActionProvider {
    turns: Vec<Submission>,
}

impl ScriptedActionProvider {
    pub fn new(turns: Vec<Submission>) -> Self {
        Self { turns }
    }
}

#[async_trait]
impl ActionProvider for ScriptedActionProvider {
    async fn provide(&self, _side: TeamSide, state: &MatchState) -> Result<Submission> {
        let index = state.turn.saturating_sub(1) as usize;
        Ok(self.turns.get(index).cloned().unwrap_or_default())
    }
}
