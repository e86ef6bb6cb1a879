//! Schema versions for the key-value database.
//!
//! # Invariants
//! - Versions in `SCHEMA_STEPS` are strictly increasing from 1.
//! - `PRAGMA user_version` always names the last applied step.
//! - A database written by a newer build is refused, never downgraded.

use crate::store::{StoreError, StoreResult};
use log::info;
use rusqlite::Connection;

/// `(version, sql)` pairs applied in order.
const SCHEMA_STEPS: &[(u32, &str)] = &[(1, include_str!("0001_kv_store.sql"))];

/// Returns the schema version this build writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to [`latest_version`] in a single transaction.
///
/// # Errors
/// - `StoreError::UnsupportedSchemaVersion` when the file is newer than this
///   build.
/// - `StoreError::Sqlite` when a step fails; nothing is applied then.
pub fn apply_migrations(conn: &mut Connection) -> StoreResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let pending = pending_steps(found)?;
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for &(version, sql) in pending {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!(
        "event=schema_migrate module=db status=ok from_version={found} to_version={}",
        latest_version()
    );
    Ok(())
}

fn pending_steps(found: u32) -> StoreResult<&'static [(u32, &'static str)]> {
    let latest = latest_version();
    if found > latest {
        return Err(StoreError::UnsupportedSchemaVersion {
            found,
            supported: latest,
        });
    }
    let first_pending = SCHEMA_STEPS.partition_point(|(version, _)| *version <= found);
    Ok(&SCHEMA_STEPS[first_pending..])
}
