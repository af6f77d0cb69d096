//! JSON Export functionality
//!
//! Exports declarations to JSON with schema versioning. Declarations are
//! written in their stored record layout so an export can be read back by
//! anything that reads the collection itself.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FiscaError, FiscaResult};
use crate::models::Declaration;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Declaration export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Export metadata
    pub metadata: ExportMetadata,

    /// Exported declarations, in listing order
    pub declarations: Vec<Declaration>,
}

/// Export metadata for reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Total number of declarations
    pub declaration_count: usize,

    /// Number of declarations per category key
    pub by_category: BTreeMap<String, usize>,

    /// Earliest filing period, as `YYYY-MM`
    pub earliest_period: Option<String>,

    /// Latest filing period, as `YYYY-MM`
    pub latest_period: Option<String>,

    /// Whether the declarations were narrowed by a filter
    pub filtered: bool,
}

/// `YYYY-MM`, or `None` when the stored period is incomplete
fn period_key(declaration: &Declaration) -> Option<String> {
    let period = &declaration.period;
    if period.year.trim().is_empty() || period.month.trim().is_empty() {
        return None;
    }
    Some(format!("{}-{}", period.year, period.month))
}

impl ExportMetadata {
    pub fn from_declarations(declarations: &[Declaration], filtered: bool) -> Self {
        let mut by_category = BTreeMap::new();
        for decl in declarations {
            *by_category
                .entry(decl.category().key().to_string())
                .or_insert(0) += 1;
        }

        Self {
            declaration_count: declarations.len(),
            by_category,
            earliest_period: declarations.iter().filter_map(period_key).min(),
            latest_period: declarations.iter().filter_map(period_key).max(),
            filtered,
        }
    }
}

impl DeclarationExport {
    pub fn new(declarations: Vec<Declaration>, filtered: bool) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            metadata: ExportMetadata::from_declarations(&declarations, filtered),
            declarations,
        }
    }
}

/// Export declarations to JSON
pub fn export_declarations_json<W: Write>(
    declarations: &[Declaration],
    filtered: bool,
    writer: &mut W,
    pretty: bool,
) -> FiscaResult<()> {
    let export = DeclarationExport::new(declarations.to_vec(), filtered);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FiscaError::Export(e.to_string()))?;

    Ok(())
}
