//! Declaration service
//!
//! Provides business logic for declarations: validation before saving,
//! the pre-save delay, lookup by id or id prefix, listing and deletion.

use std::time::Duration;

use tracing::{info, warn};

use crate::error::{FiscaError, FiscaResult};
use crate::models::{Declaration, DeclarationDraft, DeclarationId};
use crate::storage::Storage;

use super::filter::{sort_most_recent_first, DeclarationFilter};

/// Delay applied before a submitted declaration is written
pub const DEFAULT_SAVE_DELAY: Duration = Duration::from_millis(400);

/// Service for declaration management
pub struct DeclarationService<'a> {
    storage: &'a Storage,
    save_delay: Duration,
}

impl<'a> DeclarationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            save_delay: DEFAULT_SAVE_DELAY,
        }
    }

    pub fn with_save_delay(mut self, save_delay: Duration) -> Self {
        self.save_delay = save_delay;
        self
    }

    /// Validate, wait the save delay, then save
    ///
    /// A draft that fails validation is rejected immediately and the
    /// collection is left unchanged.
    pub async fn submit(&self, draft: DeclarationDraft) -> FiscaResult<Declaration> {
        draft.validate()?;
        if !self.save_delay.is_zero() {
            tokio::time::sleep(self.save_delay).await;
        }
        self.create(draft)
    }

    /// Validate and save a draft without delay
    pub fn create(&self, draft: DeclarationDraft) -> FiscaResult<Declaration> {
        draft.validate()?;

        let declaration = draft.into_declaration();
        self.storage.declarations.append(declaration.clone())?;

        if let Err(e) = self.storage.log_create(&declaration) {
            warn!(error = %e, "could not write audit entry");
        }
        info!(
            id = %declaration.id,
            category = declaration.category().key(),
            "declaration saved"
        );

        Ok(declaration)
    }

    /// Declarations matching the filter, newest first
    pub fn list(&self, filter: &DeclarationFilter) -> FiscaResult<Vec<Declaration>> {
        let all = self.storage.declarations.list()?;
        let mut matching = filter.apply(&all);
        sort_most_recent_first(&mut matching);
        Ok(matching)
    }

    pub fn get(&self, id: &DeclarationId) -> FiscaResult<Option<Declaration>> {
        self.storage.declarations.get(id)
    }

    /// Find a declaration by exact id or unique id prefix
    pub fn find(&self, identifier: &str) -> FiscaResult<Declaration> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(FiscaError::declaration_not_found(identifier));
        }
        let all = self.storage.declarations.list()?;

        if let Some(exact) = all.iter().find(|d| d.id.as_str() == identifier) {
            return Ok(exact.clone());
        }

        let mut matches = all.into_iter().filter(|d| d.id.matches_prefix(identifier));
        match (matches.next(), matches.next()) {
            (Some(found), None) => Ok(found),
            (None, _) => Err(FiscaError::declaration_not_found(identifier)),
            (Some(_), Some(_)) => Err(FiscaError::Ambiguous {
                identifier: identifier.to_string(),
                matches: 2 + matches.count(),
            }),
        }
    }

    /// Delete a declaration by id or unique id prefix
    pub fn delete(&self, identifier: &str) -> FiscaResult<Declaration> {
        let declaration = self.find(identifier)?;
        self.storage.declarations.remove(&declaration.id)?;

        if let Err(e) = self.storage.log_delete(&declaration) {
            warn!(error = %e, "could not write audit entry");
        }
        info!(id = %declaration.id, "declaration deleted");

        Ok(declaration)
    }

    pub fn count(&self) -> FiscaResult<usize> {
        self.storage.declarations.count()
    }
}
