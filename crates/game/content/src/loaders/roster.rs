//! Character roster loader.

use std::collections::BTreeSet;
use std::path::Path;

use arena_core::{CharacterDef, Roster};

use crate::loaders::{LoadResult, read_file};

/// Loader for the character catalogue from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `Vec<CharacterDef>`
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, does not parse, or lists the same
    /// character id twice.
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        let roster = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;

        tracing::debug!(
            path = %path.display(),
            characters = roster.len(),
            "loaded roster"
        );
        Ok(roster)
    }

    pub fn parse(content: &str) -> LoadResult<Roster> {
        let defs: Vec<CharacterDef> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for def in &defs {
            if !seen.insert(def.id.clone()) {
                anyhow::bail!("Duplicate character id '{}' in roster", def.id);
            }
        }

        Ok(defs.into_iter().collect())
    }
}
