//! YAML Export functionality
//!
//! Same content as the JSON export, for reading by people.

use std::io::Write;

use crate::error::{FiscaError, FiscaResult};
use crate::export::json::DeclarationExport;
use crate::models::Declaration;

/// Export declarations to YAML
pub fn export_declarations_yaml<W: Write>(
    declarations: &[Declaration],
    filtered: bool,
    writer: &mut W,
) -> FiscaResult<()> {
    let export = DeclarationExport::new(declarations.to_vec(), filtered);

    writeln!(writer, "# fisca-cli declaration export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| FiscaError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| FiscaError::Export(e.to_string()))?;

    Ok(())
}
