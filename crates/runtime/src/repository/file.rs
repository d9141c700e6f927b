//! File-based MatchRepository implementation.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use arena_core::MatchState;

use super::error::{RepositoryError, Result};
use super::traits::{MatchRepository, TurnRecord};

/// State file contents: the state plus its root, checked on load.
#[derive(Serialize, Deserialize)]
struct StoredState {
    state_root: String,
    state: MatchState,
}

/// File-based implementation of MatchRepository.
///
/// # File Format
///
/// Each match gets its own directory under `base_dir`:
///
/// ```text
/// base_dir/
/// └── {match_id}/
///     ├── state.json   latest state and its hex state root
///     └── turns.jsonl  one TurnRecord per line, oldest first
/// ```
///
/// State writes go through a temp file and an atomic rename.
pub struct FileMatchRepo {
    base_dir: PathBuf,
}

impl FileMatchRepo {
    const STATE_FILE: &'static str = "state.json";
    const TURNS_FILE: &'static str = "turns.jsonl";

    /// Create a new file-based match repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn match_dir(&self, match_id: &str) -> Result<PathBuf> {
        let valid = !match_id.is_empty()
            && match_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RepositoryError::InvalidMatchId(match_id.to_owned()));
        }
        Ok(self.base_dir.join(match_id))
    }

    fn encode_state(state: &MatchState) -> Result<Vec<u8>> {
        let stored = StoredState {
            state_root: hex::encode(state.state_root()),
            state: state.clone(),
        };
        Ok(serde_json::to_vec_pretty(&stored)?)
    }
}

impl MatchRepository for FileMatchRepo {
    fn save_state(&self, match_id: &str, state: &MatchState) -> Result<()> {
        let dir = self.match_dir(match_id)?;
        fs::create_dir_all(&dir)?;

        let path = dir.join(Self::STATE_FILE);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, Self::encode_state(state)?)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved match[{}] turn {} to {}", match_id, state.turn, path.display());

        Ok(())
    }

    fn load_state(&self, match_id: &str) -> Result<Option<MatchState>> {
        let path = self.match_dir(match_id)?.join(Self::STATE_FILE);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let stored: StoredState = serde_json::from_slice(&bytes)?;

        let actual = hex::encode(stored.state.state_root());
        if actual != stored.state_root {
            return Err(RepositoryError::CorruptedData(format!(
                "match {} state root mismatch: recorded {}, computed {}",
                match_id, stored.state_root, actual
            )));
        }

        tracing::debug!("Loaded match[{}] from {}", match_id, path.display());

        Ok(Some(stored.state))
    }

    fn append_turn(&self, match_id: &str, record: &TurnRecord) -> Result<()> {
        let dir = self.match_dir(match_id)?;
        fs::create_dir_all(&dir)?;

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(Self::TURNS_FILE))?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Stages the state in its temp file, appends the record, then renames.
    ///
    /// A refused append drops the staged state; a failed rename truncates the
    /// turn log back to its previous length.
    fn commit_turn(&self, match_id: &str, state: &MatchState, record: &TurnRecord) -> Result<()> {
        let dir = self.match_dir(match_id)?;
        fs::create_dir_all(&dir)?;

        let path = dir.join(Self::STATE_FILE);
        let temp_path = path.with_extension("json.tmp");
        let turns_path = dir.join(Self::TURNS_FILE);

        fs::write(&temp_path, Self::encode_state(state)?)?;
        let logged = fs::metadata(&turns_path).map(|m| m.len()).unwrap_or(0);

        if let Err(err) = self.append_turn(match_id, record) {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                tracing::warn!("Could not drop staged state for match[{}]: {}", match_id, cleanup);
            }
            return Err(err);
        }

        if let Err(err) = fs::rename(&temp_path, &path) {
            let truncated = OpenOptions::new()
                .write(true)
                .open(&turns_path)
                .and_then(|file| file.set_len(logged));
            if let Err(cleanup) = truncated {
                tracing::warn!("Could not roll back turn log for match[{}]: {}", match_id, cleanup);
            }
            return Err(err.into());
        }

        tracing::debug!("Committed match[{}] turn {} to {}", match_id, record.turn, path.display());

        Ok(())
    }

    fn load_turns(&self, match_id: &str) -> Result<Vec<TurnRecord>> {
        let path = self.match_dir(match_id)?.join(Self::TURNS_FILE);

        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(RepositoryError::from))
            .collect()
    }

    fn exists(&self, match_id: &str) -> bool {
        self.match_dir(match_id)
            .map(|dir| dir.join(Self::STATE_FILE).exists())
            .unwrap_or(false)
    }

    fn delete(&self, match_id: &str) -> Result<()> {
        let dir = self.match_dir(match_id)?;

        if dir.exists() {
            fs::remove_dir_all(&dir)?;
            tracing::debug!("Deleted match[{}]", match_id);
        }

        Ok(())
    }

    fn list_matches(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if path.join(Self::STATE_FILE).exists()
                && let Some(name) = path.file_name().and_then(|s| s.to_str())
            {
                ids.push(name.to_owned());
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}
