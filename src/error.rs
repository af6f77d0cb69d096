//! Custom error types for fisca-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::DeclarationValidationError;

/// The main error type for fisca-cli operations
#[derive(Error, Debug)]
pub enum FiscaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors raised before a declaration is saved
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// An identifier prefix matched more than one entity
    #[error("Identifier '{identifier}' is ambiguous ({matches} matches)")]
    Ambiguous { identifier: String, matches: usize },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Region reference data errors
    #[error("Region fetch error: {0}")]
    Region(String),

    /// Import errors (row files)
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FiscaError {
    /// Create a "not found" error for declarations
    pub fn declaration_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Declaration",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for FiscaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FiscaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<DeclarationValidationError> for FiscaError {
    fn from(err: DeclarationValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<reqwest::Error> for FiscaError {
    fn from(err: reqwest::Error) -> Self {
        Self::Region(err.to_string())
    }
}

/// Result type alias for fisca-cli operations
pub type FiscaResult<T> = Result<T, FiscaError>;
