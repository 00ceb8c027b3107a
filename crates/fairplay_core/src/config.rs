//! Runtime configuration resolved from the environment.
//!
//! Every value has a default so a bare invocation works:
//! - `FAIRPLAY_DB_PATH`: `<temp>/fairplay.sqlite3`
//! - `FAIRPLAY_LOG_LEVEL`: `debug` in debug builds, `info` in release builds
//! - `FAIRPLAY_LOG_DIR`: `<temp>/fairplay-logs`

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "FAIRPLAY_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "FAIRPLAY_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "FAIRPLAY_LOG_DIR";

const DEFAULT_DB_FILE: &str = "fairplay.sqlite3";
const DEFAULT_LOG_DIR: &str = "fairplay-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves the configuration through `lookup`. Blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_live_under_temp_dir() {
        let config = AppConfig::default();
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("fairplay.sqlite3")
        );
        assert_eq!(config.log_dir, std::env::temp_dir().join("fairplay-logs"));
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn lookup_values_override_defaults_and_blank_is_unset() {
        let vars = HashMap::from([
            (DB_PATH_ENV, "/var/lib/fairplay/db.sqlite3"),
            (LOG_LEVEL_ENV, " warn "),
            (LOG_DIR_ENV, "   "),
        ]);
        let config = AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(
            config.db_path,
            PathBuf::from("/var/lib/fairplay/db.sqlite3")
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, std::env::temp_dir().join("fairplay-logs"));
    }
}
