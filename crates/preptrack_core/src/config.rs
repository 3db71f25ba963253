//! Runtime configuration resolved from the process environment.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; every setting has a default except the log
//!   directory, whose absence disables file logging.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Overrides the tracker database path.
pub const DB_PATH_ENV: &str = "PREPTRACK_DB_PATH";
/// Overrides the log level (`trace|debug|info|warn|error`).
pub const LOG_LEVEL_ENV: &str = "PREPTRACK_LOG_LEVEL";
/// Enables file logging into this absolute directory.
pub const LOG_DIR_ENV: &str = "PREPTRACK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "preptrack.sqlite3";

/// Resolved tracker settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl TrackerConfig {
    /// Resolves settings from `PREPTRACK_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TrackerConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let vars = HashMap::from([(LOG_DIR_ENV, "   ")]);
        let config = TrackerConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("preptrack.sqlite3")
        );
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn explicit_values_are_trimmed() {
        let vars = HashMap::from([
            (DB_PATH_ENV, " /data/tracker.db "),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "/var/log/preptrack"),
        ]);
        let config = TrackerConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/data/tracker.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/preptrack"));
    }
}
