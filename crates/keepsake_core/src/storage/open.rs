//! Connection bootstrap for the SQLite key-value backend.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas and bootstrap the schema before handing
//!   out a usable store.
//!
//! # Invariants
//! - Returned stores have the `kv_entries` table at `SCHEMA_VERSION`.
//! - Every open emits exactly one terminal `kv_open` event (ok or error).

use super::schema::ensure_schema;
use super::sqlite::SqliteKeyValueStore;
use super::StorageResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens (or creates) a SQLite key-value file and bootstraps its schema.
///
/// # Side effects
/// - Creates the database file when missing.
/// - Emits `kv_open` logging events with duration and status.
pub fn open_kv(path: impl AsRef<Path>) -> StorageResult<SqliteKeyValueStore> {
    open_with("file", || Connection::open(path))
}

/// Opens a private in-memory SQLite key-value store.
pub fn open_kv_in_memory() -> StorageResult<SqliteKeyValueStore> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StorageResult<SqliteKeyValueStore> {
    let started_at = Instant::now();
    info!("event=kv_open module=storage status=start mode={mode}");

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=kv_open module=storage status=error mode={} duration_ms={} error_code=kv_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=kv_open module=storage status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(SqliteKeyValueStore::new(conn))
        }
        Err(err) => {
            error!(
                "event=kv_open module=storage status=error mode={} duration_ms={} error_code=kv_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StorageResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    ensure_schema(conn)?;
    Ok(())
}
