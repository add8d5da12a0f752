//! Flat key-value persistence used to mirror record collections.
//!
//! # Responsibility
//! - Define the `KeyValueStore` contract the record store writes through.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - A `write` fully replaces the previous value of a key.
//! - SQLite schema version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write keys before the schema bootstrap succeeds.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod open;
mod schema;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use open::{open_kv, open_kv_in_memory};
pub use schema::SCHEMA_VERSION;
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Backend refused the operation (e.g. a read-only or failing medium).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Platform persistence service seen by a record store.
pub trait KeyValueStore {
    /// Returns the stored bytes, or `None` when the key was never written.
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;
    /// Overwrites the value stored under `key`.
    fn write(&mut self, key: &str, value: &[u8]) -> StorageResult<()>;
    /// Removes `key`; returns whether it existed.
    fn remove(&mut self, key: &str) -> StorageResult<bool>;
}
