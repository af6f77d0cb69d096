//! Declaration period representation
//!
//! A period is a (month, year) pair of short string codes, as chosen in the
//! filing form: months are `"01"`..`"12"`, years are four-digit strings.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Month codes with their French display labels
pub const MONTHS: [(&str, &str); 12] = [
    ("01", "Janvier"),
    ("02", "Février"),
    ("03", "Mars"),
    ("04", "Avril"),
    ("05", "Mai"),
    ("06", "Juin"),
    ("07", "Juillet"),
    ("08", "Août"),
    ("09", "Septembre"),
    ("10", "Octobre"),
    ("11", "Novembre"),
    ("12", "Décembre"),
];

/// Display label for a month code, if the code is known
pub fn month_label(code: &str) -> Option<&'static str> {
    MONTHS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

/// Check that a month code is one of `"01"`..`"12"`
pub fn is_valid_month(code: &str) -> bool {
    month_label(code).is_some()
}

/// Normalize user input like `"3"` to the two-digit code `"03"`
pub fn normalize_month(input: &str) -> String {
    let input = input.trim();
    match input.parse::<u32>() {
        Ok(n) if (1..=12).contains(&n) => format!("{:02}", n),
        _ => input.to_string(),
    }
}

/// Filing period
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Period {
    /// Two-digit month code
    pub month: String,
    /// Year code
    pub year: String,
}

impl Period {
    /// Create a period, normalizing the month code
    pub fn new(month: impl AsRef<str>, year: impl Into<String>) -> Self {
        Self {
            month: normalize_month(month.as_ref()),
            year: year.into().trim().to_string(),
        }
    }

    /// The period containing today's date (the form's default)
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            month: format!("{:02}", today.month()),
            year: today.year().to_string(),
        }
    }

    /// Month label, or the raw code when unknown
    pub fn month_label(&self) -> &str {
        month_label(&self.month).unwrap_or(&self.month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_label(), self.year)
    }
}
