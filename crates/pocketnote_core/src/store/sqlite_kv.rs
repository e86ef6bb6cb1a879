//! SQLite-backed key-value store.
//!
//! # Invariants
//! - Values live in the `kv_store` table created by migration 1.
//! - `set` is an upsert that also refreshes `updated_at`.

use crate::store::{KeyValueStore, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_store";

/// Key-value store over a migrated SQLite connection.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Constructs a store from a connection returned by `open_db*`.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        if !table_exists(conn, KV_TABLE)? {
            return Err(StoreError::MissingRequiredTable(KV_TABLE));
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
