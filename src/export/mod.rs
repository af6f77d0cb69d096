//! Export module for fisca-cli
//!
//! Exports saved declarations in multiple formats:
//! - CSV: one line per table row, spreadsheet-compatible
//! - JSON: machine-readable export with schema version and metadata
//! - YAML: human-readable variant of the JSON export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_declarations_csv, CSV_COLUMNS};
pub use json::{export_declarations_json, DeclarationExport, ExportMetadata, EXPORT_SCHEMA_VERSION};
pub use yaml::export_declarations_yaml;
