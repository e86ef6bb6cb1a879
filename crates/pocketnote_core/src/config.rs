//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve where the collection is stored and how logging starts.
//! - Keep defaults in one place so front ends only override what they need.

use crate::logging::default_log_level;
use crate::store::collection_store::DEFAULT_COLLECTION_KEY;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "POCKETNOTE_DB_PATH";
pub const STORAGE_KEY_ENV: &str = "POCKETNOTE_STORAGE_KEY";
pub const LOG_LEVEL_ENV: &str = "POCKETNOTE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "POCKETNOTE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "pocketnote.sqlite3";

/// Settings needed to open a note session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// SQLite file that holds the key-value table.
    pub db_path: PathBuf,
    /// Key under which the collection is stored.
    pub storage_key: String,
    /// Log level name, validated when logging starts.
    pub log_level: String,
    /// Absolute log directory. File logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_COLLECTION_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Builds a config from `POCKETNOTE_*` variables, falling back to
    /// defaults for unset or blank values.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            storage_key: read(STORAGE_KEY_ENV).unwrap_or(defaults.storage_key),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}
