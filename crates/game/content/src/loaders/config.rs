//! Arena configuration loader.

use std::path::Path;

use arena_core::ArenaConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for arena tunables from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Every field is optional; omitted fields keep the engine defaults.
    pub fn load(path: &Path) -> LoadResult<ArenaConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ArenaConfig> {
        let config: ArenaConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse arena config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config = ConfigLoader::parse("max_team_white = 2\ncolored_per_turn = 4\n").unwrap();

        assert_eq!(config.max_team_white, 2);
        assert_eq!(config.colored_per_turn, 4);
        assert_eq!(
            config.burn_reward_per_pair,
            ArenaConfig::DEFAULT_BURN_REWARD_PER_PAIR
        );
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").unwrap(), ArenaConfig::default());
    }

    #[test]
    fn rejects_wrong_types() {
        let err = ConfigLoader::parse("colored_per_turn = \"three\"").unwrap_err();
        assert!(err.to_string().contains("arena config"));
    }
}
