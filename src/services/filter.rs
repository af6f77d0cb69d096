//! Declaration filtering
//!
//! A [`DeclarationFilter`] is a set of optional constraints combined with
//! AND. Filtering keeps the input order; sorting is a separate step.

use crate::models::{Classification, Declaration, DeclarationCategory};

/// Options for filtering declarations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationFilter {
    /// Exact month code
    pub month: Option<String>,
    /// Exact year
    pub year: Option<String>,
    /// Case-insensitive substring of the direction
    pub direction: Option<String>,
    pub category: Option<DeclarationCategory>,
    /// Inclusive lower bound on the representative total
    pub amount_min: Option<f64>,
    /// Inclusive upper bound on the representative total
    pub amount_max: Option<f64>,
}

/// Blank input and the "all" choice both mean "no constraint"
fn constraint(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(value.to_string())
    }
}

impl DeclarationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by month code ("3" and "03" are the same month)
    pub fn month(mut self, month: &str) -> Self {
        self.month = constraint(month).map(|m| crate::models::period::normalize_month(&m));
        self
    }

    pub fn year(mut self, year: &str) -> Self {
        self.year = constraint(year);
        self
    }

    pub fn direction(mut self, direction: &str) -> Self {
        self.direction = constraint(direction);
        self
    }

    pub fn category(mut self, category: Option<DeclarationCategory>) -> Self {
        self.category = category;
        self
    }

    /// Filter by representative total range (inclusive)
    pub fn amount_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.amount_min = min;
        self.amount_max = max;
        self
    }

    /// Whether any constraint is set
    pub fn is_active(&self) -> bool {
        self.month.is_some()
            || self.year.is_some()
            || self.direction.is_some()
            || self.category.is_some()
            || self.amount_min.is_some()
            || self.amount_max.is_some()
    }

    /// Check a single declaration against every constraint
    pub fn matches(&self, declaration: &Declaration) -> bool {
        if let Some(month) = &self.month {
            if &declaration.period.month != month {
                return false;
            }
        }

        if let Some(year) = &self.year {
            if &declaration.period.year != year {
                return false;
            }
        }

        if let Some(direction) = &self.direction {
            if !declaration
                .direction
                .to_lowercase()
                .contains(&direction.to_lowercase())
            {
                return false;
            }
        }

        if let Some(category) = self.category {
            if declaration.category() != Classification::Category(category) {
                return false;
            }
        }

        if self.amount_min.is_some() || self.amount_max.is_some() {
            let total = declaration.representative_total();
            if self.amount_min.is_some_and(|min| total < min) {
                return false;
            }
            if self.amount_max.is_some_and(|max| total > max) {
                return false;
            }
        }

        true
    }

    /// Matching declarations, in input order
    pub fn apply(&self, declarations: &[Declaration]) -> Vec<Declaration> {
        declarations
            .iter()
            .filter(|d| self.matches(d))
            .cloned()
            .collect()
    }
}

/// Sort by creation time, newest first; records with no readable time go last
pub fn sort_most_recent_first(declarations: &mut [Declaration]) {
    declarations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
