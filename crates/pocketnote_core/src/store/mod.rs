//! Persistent key-value storage and the collection store adapter.
//!
//! # Responsibility
//! - Define the key-value contract the engine persists through.
//! - Provide SQLite-backed and in-memory implementations.
//! - Bridge the in-memory collection to one fixed storage key.
//!
//! # Invariants
//! - `set` overwrites the whole value under a key.
//! - The collection is always written in full; there are no partial writes.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod collection_store;
pub mod memory_kv;
pub mod sqlite_kv;

pub type StoreResult<T> = Result<T, StoreError>;

/// Raw string key-value storage addressed by key.
///
/// Mutating calls take `&mut self`: one store has exactly one writer.
pub trait KeyValueStore {
    /// Returns the value under `key`, or `None` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }
}

/// Storage failure surfaced by key-value stores and the collection adapter.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// Database file was written by a newer schema than this build knows.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// Backing schema is missing a table the store depends on.
    MissingRequiredTable(&'static str),
    /// Write rejected because it would exceed the configured byte budget.
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
    /// Collection could not be encoded for storage.
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "store schema version {found} is newer than supported {supported}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table: {table}"),
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded for key `{key}`: {required_bytes} bytes needed, {quota_bytes} allowed"
            ),
            Self::Serialize(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. }
            | Self::MissingRequiredTable(_)
            | Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
