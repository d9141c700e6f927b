//! Content factory for building the roster and tunables from data files.

use std::path::{Path, PathBuf};

use arena_core::{ArenaConfig, Roster};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader};

/// Content factory that loads all arena content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── arena.toml
/// └── characters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const ROSTER_FILE: &'static str = "characters.ron";
    pub const CONFIG_FILE: &'static str = "arena.toml";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the sample content shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load the character catalogue from `characters.ron`.
    pub fn load_roster(&self) -> LoadResult<Roster> {
        RosterLoader::load(&self.data_dir.join(Self::ROSTER_FILE))
    }

    /// Load tunables from `arena.toml`.
    ///
    /// A missing file is not an error: the engine defaults apply.
    pub fn load_config(&self) -> LoadResult<ArenaConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no arena config, using defaults");
            return Ok(ArenaConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), ArenaConfig::default());
        assert!(factory.load_roster().is_err());
    }
}
