//! In-memory MatchRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use arena_core::MatchState;

use super::error::{RepositoryError, Result};
use super::traits::{MatchRepository, TurnRecord};

#[derive(Default)]
struct StoredMatch {
    state: Option<MatchState>,
    turns: Vec<TurnRecord>,
}

/// In-memory implementation of MatchRepository.
#[derive(Default)]
pub struct InMemoryMatchRepo {
    matches: RwLock<HashMap<String, StoredMatch>>,
}

impl InMemoryMatchRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchRepository for InMemoryMatchRepo {
    fn save_state(&self, match_id: &str, state: &MatchState) -> Result<()> {
        let mut matches = self
            .matches
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        matches.entry(match_id.to_owned()).or_default().state = Some(state.clone());
        Ok(())
    }

    fn load_state(&self, match_id: &str) -> Result<Option<MatchState>> {
        let matches = self
            .matches
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(matches.get(match_id).and_then(|m| m.state.clone()))
    }

    fn append_turn(&self, match_id: &str, record: &TurnRecord) -> Result<()> {
        let mut matches = self
            .matches
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        matches
            .entry(match_id.to_owned())
            .or_default()
            .turns
            .push(record.clone());
        Ok(())
    }

    fn commit_turn(&self, match_id: &str, state: &MatchState, record: &TurnRecord) -> Result<()> {
        let mut matches = self
            .matches
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let stored = matches.entry(match_id.to_owned()).or_default();
        stored.state = Some(state.clone());
        stored.turns.push(record.clone());
        Ok(())
    }

    fn load_turns(&self, match_id: &str) -> Result<Vec<TurnRecord>> {
        let matches = self
            .matches
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(matches
            .get(match_id)
            .map(|m| m.turns.clone())
            .unwrap_or_default())
    }

    fn exists(&self, match_id: &str) -> bool {
        self.matches
            .read()
            .map(|matches| matches.get(match_id).is_some_and(|m| m.state.is_some()))
            .unwrap_or(false)
    }

    fn delete(&self, match_id: &str) -> Result<()> {
        let mut matches = self
            .matches
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        matches.remove(match_id);
        Ok(())
    }

    fn list_matches(&self) -> Result<Vec<String>> {
        let matches = self
            .matches
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<String> = matches
            .iter()
            .filter(|(_, m)| m.state.is_some())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
