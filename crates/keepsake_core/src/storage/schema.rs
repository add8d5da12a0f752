//! Schema bootstrap for the SQLite key-value table.
//!
//! The backend holds one table, so there is no migration history: every open
//! re-runs an idempotent `CREATE TABLE IF NOT EXISTS` and stamps
//! `PRAGMA user_version` with `SCHEMA_VERSION`.

use crate::storage::{StorageError, StorageResult};
use log::{debug, info};
use rusqlite::Connection;

/// Schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const CREATE_KV_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY NOT NULL,
    value BLOB NOT NULL,
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s','now') * 1000)
);";

/// Creates the key-value table when missing and records the schema version.
///
/// # Errors
/// - `StorageError::UnsupportedSchemaVersion` when the file was written by a
///   newer schema; the database is left untouched.
pub(super) fn ensure_schema(conn: &mut Connection) -> StorageResult<()> {
    let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if found > SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: SCHEMA_VERSION,
        });
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_KV_TABLE_SQL)?;
    if found != SCHEMA_VERSION {
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    }
    tx.commit()?;

    if found == SCHEMA_VERSION {
        debug!("event=kv_schema module=storage status=ok version={SCHEMA_VERSION}");
    } else {
        info!(
            "event=kv_schema module=storage status=ok from_version={} to_version={}",
            found, SCHEMA_VERSION
        );
    }
    Ok(())
}
