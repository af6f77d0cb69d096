//! Storage layer for fisca-cli
//!
//! Provides keyed JSON storage with atomic writes and the declaration
//! repository built on it.

pub mod declarations;
pub mod file_io;
pub mod kv;

pub use declarations::{DeclarationRepository, DECLARATIONS_KEY};
pub use file_io::{read_text, write_json_atomic, write_text_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};

use std::sync::Arc;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::FiscaPaths;
use crate::error::FiscaResult;
use crate::models::Declaration;

/// Main storage coordinator that provides access to the repository and audit log
pub struct Storage {
    paths: FiscaPaths,
    pub declarations: DeclarationRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a file-backed Storage instance under the data directory
    pub fn new(paths: FiscaPaths) -> FiscaResult<Self> {
        paths.ensure_directories()?;
        let store = Arc::new(FileStore::new(paths.data_dir()));
        Ok(Self::with_store(paths, store))
    }

    /// Create a Storage instance over an arbitrary key-value store
    pub fn with_store(paths: FiscaPaths, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            declarations: DeclarationRepository::new(store),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        }
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FiscaPaths {
        &self.paths
    }

    /// Load all data from the store
    pub fn load_all(&self) -> FiscaResult<()> {
        self.declarations.load()
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record the creation of a declaration in the audit log
    pub fn log_create(&self, declaration: &Declaration) -> FiscaResult<()> {
        self.audit.log(&AuditEntry::create(declaration))
    }

    /// Record the deletion of a declaration in the audit log
    pub fn log_delete(&self, declaration: &Declaration) -> FiscaResult<()> {
        self.audit.log(&AuditEntry::delete(declaration))
    }
}
