//! Declaration repository
//!
//! The whole collection lives as one JSON array under a single key of a
//! [`KeyValueStore`], newest first. Records are decoded one at a time and
//! each keeps the JSON it was read from, so a record this version cannot
//! fully interpret (no populated table, a bad timestamp, unknown fields) is
//! listed as undefined and written back unchanged.
//!
//! Content that is not a JSON array at all is copied to a side key before
//! anything else is written. If that copy fails, or the store cannot be
//! read, writes are refused for the session so the stored data is never
//! replaced. Otherwise writing is best-effort: a failed write is logged and
//! the in-memory collection keeps the change for the rest of the session.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{FiscaError, FiscaResult};
use crate::models::{Declaration, DeclarationId, FlatDeclaration};

use super::kv::KeyValueStore;

/// Key under which the collection is stored
pub const DECLARATIONS_KEY: &str = "fiscal_declarations";

/// A declaration plus the stored JSON it was decoded from
#[derive(Debug, Clone)]
struct StoredDeclaration {
    declaration: Declaration,
    /// `None` for records created in this session
    raw: Option<Value>,
}

impl StoredDeclaration {
    fn to_value(&self) -> serde_json::Result<Value> {
        match &self.raw {
            Some(raw) => Ok(raw.clone()),
            None => serde_json::to_value(&self.declaration),
        }
    }
}

#[derive(Debug)]
struct Collection {
    entries: Vec<StoredDeclaration>,
    /// False when the stored content could be neither read nor set aside
    writable: bool,
}

impl Collection {
    fn writable(entries: Vec<StoredDeclaration>) -> Self {
        Self {
            entries,
            writable: true,
        }
    }

    fn read_only() -> Self {
        Self {
            entries: Vec::new(),
            writable: false,
        }
    }
}

/// Repository for declaration persistence
pub struct DeclarationRepository {
    store: Arc<dyn KeyValueStore>,
    data: RwLock<Collection>,
}

impl DeclarationRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            data: RwLock::new(Collection::writable(Vec::new())),
        }
    }

    /// Load the collection from the store
    pub fn load(&self) -> FiscaResult<()> {
        let collection = self.read_collection();

        let mut data = self
            .data
            .write()
            .map_err(|e| FiscaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = collection;
        debug!(
            count = data.entries.len(),
            writable = data.writable,
            "loaded declarations"
        );
        Ok(())
    }

    fn read_collection(&self) -> Collection {
        let raw = match self.store.get(DECLARATIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Collection::writable(Vec::new()),
            Err(e) => {
                warn!(error = %e, "could not read declarations; changes will not be saved");
                return Collection::read_only();
            }
        };

        if raw.trim().is_empty() {
            return Collection::writable(Vec::new());
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(records)) => Collection::writable(
                records
                    .into_iter()
                    .enumerate()
                    .map(|(idx, record)| decode_record(idx, record))
                    .collect(),
            ),
            Ok(_) => {
                warn!("stored declarations are not a list");
                self.set_aside(&raw)
            }
            Err(e) => {
                warn!(error = %e, "stored declarations are malformed");
                self.set_aside(&raw)
            }
        }
    }

    /// Copy unreadable content to a side key; the collection starts empty
    fn set_aside(&self, raw: &str) -> Collection {
        let stamp = Utc::now().format("%Y%m%d%H%M%S");
        let mut key = format!("{}-unreadable-{}", DECLARATIONS_KEY, stamp);
        let mut suffix = 1;
        while matches!(self.store.get(&key), Ok(Some(_))) {
            suffix += 1;
            key = format!("{}-unreadable-{}-{}", DECLARATIONS_KEY, stamp, suffix);
        }

        match self.store.set(&key, raw) {
            Ok(()) => {
                warn!(key = %key, "unreadable declarations moved aside, starting empty");
                Collection::writable(Vec::new())
            }
            Err(e) => {
                warn!(error = %e, "could not move unreadable declarations aside; changes will not be saved");
                Collection::read_only()
            }
        }
    }

    /// Write the collection; failures are logged and otherwise ignored
    fn persist(&self, collection: &Collection) {
        if !collection.writable {
            warn!("stored declarations were not loaded; leaving them untouched");
            return;
        }

        let records = match collection
            .entries
            .iter()
            .map(StoredDeclaration::to_value)
            .collect::<serde_json::Result<Vec<Value>>>()
        {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "could not serialize declarations");
                return;
            }
        };
        let json = match serde_json::to_string(&records) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not serialize declarations");
                return;
            }
        };
        if let Err(e) = self.store.set(DECLARATIONS_KEY, &json) {
            warn!(error = %e, "could not save declarations; changes kept for this session only");
        }
    }

    /// All declarations in stored order (newest first)
    pub fn list(&self) -> FiscaResult<Vec<Declaration>> {
        let data = self
            .data
            .read()
            .map_err(|e| FiscaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.entries.iter().map(|e| e.declaration.clone()).collect())
    }

    /// Get a declaration by exact ID
    pub fn get(&self, id: &DeclarationId) -> FiscaResult<Option<Declaration>> {
        let data = self
            .data
            .read()
            .map_err(|e| FiscaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data
            .entries
            .iter()
            .find(|e| &e.declaration.id == id)
            .map(|e| e.declaration.clone()))
    }

    /// Insert a declaration at the head of the collection and persist
    pub fn append(&self, declaration: Declaration) -> FiscaResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FiscaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        data.entries.insert(
            0,
            StoredDeclaration {
                declaration,
                raw: None,
            },
        );
        self.persist(&data);
        Ok(())
    }

    /// Remove every declaration with this ID; returns whether any was removed
    pub fn remove(&self, id: &DeclarationId) -> FiscaResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FiscaError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let before = data.entries.len();
        data.entries.retain(|e| &e.declaration.id != id);
        if data.entries.len() == before {
            return Ok(false);
        }
        self.persist(&data);
        Ok(true)
    }

    pub fn count(&self) -> FiscaResult<usize> {
        let data = self
            .data
            .read()
            .map_err(|e| FiscaError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.entries.len())
    }
}

/// Decode one stored record, falling back to an undefined declaration
///
/// A record without a usable id is addressed by its position, 1-based, as
/// `record-N`. That id lives in memory only.
fn decode_record(idx: usize, record: Value) -> StoredDeclaration {
    let mut flat = match serde_json::from_value::<FlatDeclaration>(record.clone()) {
        Ok(flat) => flat,
        Err(e) => {
            warn!(position = idx + 1, error = %e, "stored declaration is malformed, keeping it as undefined");
            FlatDeclaration {
                id: text_field(&record, "id"),
                created_at: text_field(&record, "createdAt"),
                direction: text_field(&record, "direction"),
                month: text_field(&record, "mois"),
                year: text_field(&record, "annee"),
                ..FlatDeclaration::default()
            }
        }
    };
    if flat.id.trim().is_empty() {
        flat.id = format!("record-{}", idx + 1);
    }

    let declaration = Declaration::from(flat);
    if declaration.is_undefined() {
        debug!(id = %declaration.id, "stored declaration has no populated table");
    }
    StoredDeclaration {
        declaration,
        raw: Some(record),
    }
}

/// A string or number field of a JSON object, as text
fn text_field(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeclarationBody, DeclarationDraft, EncaissementRow, Period, TapRow};
    use crate::storage::kv::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn encaissement(direction: &str) -> Declaration {
        DeclarationDraft::new(
            direction,
            Period::new("03", "2025"),
            DeclarationBody::Encaissement(vec![EncaissementRow {
                label: "Ventes".into(),
                gross_amount: "1000".into(),
            }]),
        )
        .into_declaration()
    }

    fn tap(direction: &str) -> Declaration {
        DeclarationDraft::new(
            direction,
            Period::new("04", "2025"),
            DeclarationBody::Tap(vec![TapRow {
                region_code: "16".into(),
                municipality: "Kouba".into(),
                tap_amount: "50".into(),
            }]),
        )
        .into_declaration()
    }

    fn memory_repo() -> (DeclarationRepository, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let repo = DeclarationRepository::new(store.clone());
        repo.load().unwrap();
        (repo, store)
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let (repo, _store) = memory_repo();
        assert!(repo.list().unwrap().is_empty());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_append_inserts_at_head() {
        let (repo, _store) = memory_repo();
        let first = encaissement("DR Alger");
        let second = tap("DR Oran");

        repo.append(first.clone()).unwrap();
        repo.append(second.clone()).unwrap();

        let list = repo.list().unwrap();
        assert_eq!(list[0], second);
        assert_eq!(list[1], first);
    }

    #[test]
    fn test_remove() {
        let (repo, _store) = memory_repo();
        let decl = encaissement("DR Alger");
        repo.append(decl.clone()).unwrap();

        assert!(repo.remove(&decl.id).unwrap());
        assert!(repo.get(&decl.id).unwrap().is_none());
        assert!(!repo.remove(&decl.id).unwrap());
    }

    #[test]
    fn test_persists_across_reload() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::new(temp_dir.path().to_path_buf()));
        let decl = tap("DR Annaba");

        let repo = DeclarationRepository::new(store.clone());
        repo.load().unwrap();
        repo.append(decl.clone()).unwrap();

        let reloaded = DeclarationRepository::new(store);
        reloaded.load().unwrap();
        assert_eq!(reloaded.list().unwrap(), vec![decl]);
        assert!(temp_dir.path().join("fiscal_declarations.json").exists());
    }

    fn stored_records(store: &MemoryStore) -> Vec<Value> {
        let raw = store.get(DECLARATIONS_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_unreadable_content_is_moved_aside() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::new(temp_dir.path().to_path_buf()));
        store.set(DECLARATIONS_KEY, "{not json").unwrap();

        let repo = DeclarationRepository::new(store.clone());
        repo.load().unwrap();
        assert!(repo.list().unwrap().is_empty());

        let decl = tap("DR Annaba");
        repo.append(decl.clone()).unwrap();

        let aside: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .filter(|name| name.starts_with("fiscal_declarations-unreadable-"))
            .collect();
        assert_eq!(aside.len(), 1);
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join(&aside[0])).unwrap(),
            "{not json"
        );

        let reloaded = DeclarationRepository::new(store);
        reloaded.load().unwrap();
        assert_eq!(reloaded.list().unwrap(), vec![decl]);
    }

    #[test]
    fn test_unreadable_content_untouched_when_it_cannot_be_moved() {
        let store = Arc::new(MemoryStore::new());
        store.set(DECLARATIONS_KEY, "{not json").unwrap();
        store.set_fail_writes(true);

        let repo = DeclarationRepository::new(store.clone());
        repo.load().unwrap();
        store.set_fail_writes(false);

        let decl = encaissement("DR Alger");
        repo.append(decl.clone()).unwrap();
        assert_eq!(repo.list().unwrap(), vec![decl.clone()]);
        assert!(repo.remove(&decl.id).unwrap());
        assert_eq!(
            store.get(DECLARATIONS_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn test_undefined_record_survives_append_and_remove() {
        let valid = serde_json::json!({
            "id": "1",
            "createdAt": "2025-03-14T09:30:00.000Z",
            "direction": "DR Alger",
            "mois": "03",
            "annee": "2025",
            "encRows": [],
            "tvaImmoRows": [],
            "tvaBiensRows": [],
            "timbreRows": [],
            "b12": "",
            "b13": "",
            "tapRows": [{"wilayaCode": "16", "commune": "Kouba", "tap2": "50"}]
        });
        let undefined = serde_json::json!({
            "id": "2",
            "createdAt": "",
            "direction": "",
            "mois": "",
            "annee": "",
            "encRows": [],
            "tvaImmoRows": [],
            "tvaBiensRows": [],
            "timbreRows": [],
            "b12": "",
            "b13": "",
            "tapRows": [],
            "note": "legacy"
        });
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                DECLARATIONS_KEY,
                &serde_json::to_string(&vec![valid.clone(), undefined.clone()]).unwrap(),
            )
            .unwrap();
        let repo = DeclarationRepository::new(store.clone());
        repo.load().unwrap();

        let list = repo.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].category().key(), "tap");
        assert_eq!(list[1].category().key(), "undefined");
        assert!(repo.get(&DeclarationId::from("2")).unwrap().is_some());

        let decl = encaissement("DR Oran");
        repo.append(decl.clone()).unwrap();

        let records = stored_records(&store);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["id"], decl.id.as_str());
        assert_eq!(records[1], valid);
        assert_eq!(records[2], undefined);

        assert!(repo.remove(&DeclarationId::from("2")).unwrap());
        let records = stored_records(&store);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], valid);
    }

    #[test]
    fn test_bad_records_are_kept_as_stored() {
        let bad_time = serde_json::json!({"id": "7", "createdAt": "hier", "b12": "100", "b13": "5"});
        let wrong_shape = serde_json::json!({"id": 8, "encRows": "not a list", "mois": "04"});
        let no_id = serde_json::json!(42);
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                DECLARATIONS_KEY,
                &serde_json::to_string(&vec![bad_time.clone(), wrong_shape.clone(), no_id.clone()])
                    .unwrap(),
            )
            .unwrap();
        let repo = DeclarationRepository::new(store.clone());
        repo.load().unwrap();

        let list = repo.list().unwrap();
        assert_eq!(list.len(), 3);
        assert!(list[0].created_at.is_none());
        assert_eq!(list[0].category().key(), "turnover_tax");
        assert_eq!(list[1].id.as_str(), "8");
        assert!(list[1].is_undefined());
        assert_eq!(list[1].period.month, "04");
        assert_eq!(list[2].id.as_str(), "record-3");

        repo.append(tap("DR Oran")).unwrap();
        let records = stored_records(&store);
        assert_eq!(&records[1..], &[bad_time, wrong_shape.clone(), no_id][..]);

        assert!(repo.remove(&DeclarationId::from("record-3")).unwrap());
        let records = stored_records(&store);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2], wrong_shape);
    }

    #[test]
    fn test_write_failure_keeps_session_state() {
        let (repo, store) = memory_repo();
        store.set_fail_writes(true);

        let decl = encaissement("DR Alger");
        repo.append(decl.clone()).unwrap();
        assert_eq!(repo.list().unwrap(), vec![decl]);
        assert_eq!(store.get(DECLARATIONS_KEY).unwrap(), None);
    }
}
