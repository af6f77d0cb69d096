//! Declaration identifiers
//!
//! Identifiers are opaque strings. New declarations get a random UUID in
//! simple form; collections written by older tools may carry any string
//! (timestamps, for instance), so parsing never fails.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Length of the abbreviated form shown in listings
const SHORT_LEN: usize = 8;

/// Opaque, immutable declaration identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationId(String);

impl DeclarationId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for tables
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_LEN) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Whether this ID starts with the given prefix
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.0.starts_with(prefix)
    }
}

impl Default for DeclarationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DeclarationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DeclarationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl FromStr for DeclarationId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}
