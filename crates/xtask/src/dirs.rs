//! Platform-specific directory utilities

use std::path::PathBuf;

/// Environment override for the persisted match directory.
pub const MATCH_DIR_ENV: &str = "ARENA_MATCH_DIR";

/// Get the directory where persisted matches live
///
/// Follows platform conventions:
/// - macOS: `~/Library/Application Support/arena/matches`
/// - Linux: `~/.local/share/arena/matches` (or `$XDG_DATA_HOME/arena/matches`)
/// - Windows: `%APPDATA%\arena\matches`
/// - Fallback: `./arena_data/matches`
///
/// `ARENA_MATCH_DIR` takes precedence when set.
pub fn match_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(MATCH_DIR_ENV) {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("", "", "arena")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./arena_data"))
        .join("matches")
}

/// Resolve an explicit directory flag against the default.
pub fn match_dir_or(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(match_dir)
}
