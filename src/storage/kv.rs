//! Keyed text storage
//!
//! Repositories persist through [`KeyValueStore`] rather than touching
//! files directly. [`FileStore`] keeps one `<key>.json` file per key in a
//! directory; [`MemoryStore`] keeps everything in memory and is used in
//! tests and when no data directory is wanted.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::error::{FiscaError, FiscaResult};

use super::file_io::{read_text, write_text_atomic};

/// A string-keyed store of text values
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, `None` if never set
    fn get(&self, key: &str) -> FiscaResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> FiscaResult<()>;
}

/// Keys become file names, so only a conservative alphabet is allowed
fn check_key(key: &str) -> FiscaResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(FiscaError::Storage(format!("Invalid storage key '{}'", key)))
    }
}

/// File-backed store, one JSON document per key
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> FiscaResult<Option<String>> {
        check_key(key)?;
        read_text(self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> FiscaResult<()> {
        check_key(key)?;
        write_text_atomic(self.path_for(key), value)
    }
}

/// In-memory store
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail, as a full disk would
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> FiscaResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| FiscaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> FiscaResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FiscaError::Storage(format!(
                "Write to '{}' rejected: store is read-only",
                key
            )));
        }
        let mut entries = self
            .entries
            .write()
            .map_err(|e| FiscaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
