//! Data directory resolution.

use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "PERSONACHAT_DATA_DIR";

/// Resolve the data directory holding the database and `config.toml`.
///
/// Priority: `PERSONACHAT_DATA_DIR`, then `~/.personachat`, then
/// `./.personachat` when no home directory is known.
pub fn resolve_data_dir() -> PathBuf {
    resolve_data_dir_from(std::env::var(DATA_DIR_ENV).ok(), dirs::home_dir())
}

fn resolve_data_dir_from(env_dir: Option<String>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = env_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    if let Some(home) = home {
        return home.join(".personachat");
    }

    PathBuf::from(".personachat")
}
