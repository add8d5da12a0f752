//! In-process key-value store for tests and previews.

use super::{KeyValueStore, StorageError, StorageResult};
use std::collections::HashMap;

/// `HashMap`-backed store. Writes can be made to fail on demand.
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    values: HashMap<String, Vec<u8>>,
    fail_writes: bool,
    write_count: usize,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `key` with raw bytes, bypassing the failure switch.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Makes every subsequent `write`/`remove` fail with `Unavailable`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(
                "memory store is read-only".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
        self.check_writable()?;
        self.values.insert(key.to_string(), value.to_vec());
        self.write_count += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<bool> {
        self.check_writable()?;
        Ok(self.values.remove(key).is_some())
    }
}
