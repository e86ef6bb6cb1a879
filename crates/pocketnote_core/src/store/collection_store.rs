//! Store adapter between the in-memory collection and a key-value store.
//!
//! # Responsibility
//! - Decode the stored collection once at startup.
//! - Encode and overwrite the full collection after every commit.
//!
//! # Invariants
//! - `load` treats absent or corrupt data as an empty collection, but a
//!   failed read is returned to the caller: committing over a collection
//!   that could not be read would replace it.
//! - `save` writes the complete collection under one fixed key.

use crate::model::group::{Collection, Group};
use crate::store::{KeyValueStore, StoreError, StoreResult};
use log::{debug, error, info, warn};

/// Storage key used when none is configured.
pub const DEFAULT_COLLECTION_KEY: &str = "groups";

/// Collection persistence over one key of a [`KeyValueStore`].
pub struct CollectionStore<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> CollectionStore<S> {
    /// Creates an adapter that uses [`DEFAULT_COLLECTION_KEY`].
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_COLLECTION_KEY)
    }

    /// Creates an adapter bound to a custom key.
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Returns the storage key this adapter reads and writes.
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Borrows the backing store.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Mutably borrows the backing store.
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Releases the backing store.
    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Reads the stored collection.
    ///
    /// Missing or undecodable data is treated as "no prior data" so that a
    /// damaged value never blocks startup.
    ///
    /// # Errors
    /// - Any error from the backing store's `get`, unchanged.
    pub fn load(&self) -> StoreResult<Collection> {
        let raw = match self.backend.get(self.key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(
                    "event=collection_load module=store status=ok reason=absent groups=0"
                );
                return Ok(Collection::new());
            }
            Err(err) => {
                error!(
                    "event=collection_load module=store status=error error_code=read_failed error={}",
                    err
                );
                return Err(err);
            }
        };

        match serde_json::from_str::<Collection>(raw.as_str()) {
            Ok(collection) => {
                info!(
                    "event=collection_load module=store status=ok groups={} notes={}",
                    collection.len(),
                    count_notes(&collection)
                );
                Ok(collection)
            }
            Err(err) => {
                warn!(
                    "event=collection_load module=store status=degraded error_code=decode_failed bytes={} line={} column={}",
                    raw.len(),
                    err.line(),
                    err.column()
                );
                Ok(Collection::new())
            }
        }
    }

    /// Serializes `collection` and overwrites the stored value.
    ///
    /// # Errors
    /// - `StoreError::Serialize` when encoding fails.
    /// - Any error from the backing store's `set`, unchanged.
    pub fn save(&mut self, collection: &[Group]) -> StoreResult<()> {
        let encoded = serde_json::to_string(collection).map_err(StoreError::Serialize)?;
        match self.backend.set(self.key.as_str(), encoded.as_str()) {
            Ok(()) => {
                debug!(
                    "event=collection_save module=store status=ok groups={} bytes={}",
                    collection.len(),
                    encoded.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=collection_save module=store status=error groups={} bytes={} error={}",
                    collection.len(),
                    encoded.len(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn count_notes(collection: &[Group]) -> usize {
    collection.iter().map(|group| group.notes.len()).sum()
}
