//! SQLite backing for `SqliteKeyValueStore`.
//!
//! Opening a connection and bringing the `kv_store` schema up to date are
//! one step: callers never see a connection with pending migrations.
//! Failures are reported as `StoreError`, the same type the key-value
//! store uses for reads and writes.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};
