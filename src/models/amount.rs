//! Raw amount type for form input
//!
//! Amounts are kept exactly as typed so a half-filled form round-trips
//! through storage unchanged. Two readings are offered: a lenient one used
//! for live totals (anything unreadable counts as zero) and a strict one
//! used when a declaration is saved.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric cell as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAmount(String);

impl RawAmount {
    /// Wrap typed text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The text as entered
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when nothing (or only whitespace) was entered
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Lenient reading: the longest numeric prefix, or zero
    ///
    /// `"12.5"` → 12.5, `"12abc"` → 12, `""` and `"abc"` → 0.
    pub fn value(&self) -> f64 {
        numeric_prefix(&self.0)
            .and_then(|prefix| prefix.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// Strict reading: the whole trimmed text must be a finite number
    pub fn parse(&self) -> Result<f64, AmountParseError> {
        let text = self.0.trim();
        if text.is_empty() {
            return Err(AmountParseError::Empty);
        }
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(AmountParseError::InvalidFormat(text.to_string())),
        }
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RawAmount {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RawAmount {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Error type for strict amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => write!(f, "Amount is empty"),
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}

/// Longest prefix of `s` (after leading whitespace) that reads as a decimal
/// number: optional sign, digits with at most one dot, optional exponent.
fn numeric_prefix(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when digits follow it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    Some(&s[..end])
}
