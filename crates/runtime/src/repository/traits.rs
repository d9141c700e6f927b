//! Repository contract for saving and loading match progress.

use serde::{Deserialize, Serialize};

use arena_core::{MatchState, TurnLogEntry};

use super::error::Result;

/// Combat log of one resolved turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub log: Vec<TurnLogEntry>,
}

/// Repository for match persistence.
///
/// The state is stored opaquely: whatever is saved comes back unmodified on
/// load, so a match can be resumed or replayed elsewhere.
pub trait MatchRepository: Send + Sync {
    /// Save the latest state of a match, replacing the previous one.
    fn save_state(&self, match_id: &str, state: &MatchState) -> Result<()>;

    /// Load the latest state of a match.
    fn load_state(&self, match_id: &str) -> Result<Option<MatchState>>;

    /// Append the log of a resolved turn.
    fn append_turn(&self, match_id: &str, record: &TurnRecord) -> Result<()>;

    /// Persist a resolved turn: the successor state together with its log.
    ///
    /// Either both land or neither does. The default writes the state, then
    /// the record, and puts the prior state back if the record is refused.
    fn commit_turn(&self, match_id: &str, state: &MatchState, record: &TurnRecord) -> Result<()> {
        let previous = self.load_state(match_id)?;
        self.save_state(match_id, state)?;
        if let Err(err) = self.append_turn(match_id, record) {
            match previous {
                Some(previous) => self.save_state(match_id, &previous)?,
                None => self.delete(match_id)?,
            }
            return Err(err);
        }
        Ok(())
    }

    /// Every turn log recorded for a match, oldest first.
    fn load_turns(&self, match_id: &str) -> Result<Vec<TurnRecord>>;

    /// Check if a match has a saved state.
    fn exists(&self, match_id: &str) -> bool;

    /// Delete a match and its history.
    fn delete(&self, match_id: &str) -> Result<()>;

    /// List every match with a saved state.
    fn list_matches(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
