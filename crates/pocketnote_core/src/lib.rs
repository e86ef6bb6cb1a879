//! Core state engine for PocketNote.
//! This crate owns the group/note invariants and their persistence.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::group::{Collection, Group, GroupId, GroupSummary, DEFAULT_GROUP_COLOR};
pub use model::note::{Note, NoteId};
pub use model::validation::{BlankInputError, InputField};
pub use service::note_engine::{EngineError, EngineResult, NoteEngine, UnsavedChange};
pub use store::collection_store::{CollectionStore, DEFAULT_COLLECTION_KEY};
pub use store::memory_kv::MemoryKeyValueStore;
pub use store::sqlite_kv::SqliteKeyValueStore;
pub use store::{KeyValueStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
