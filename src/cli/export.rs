//! CLI command for declaration export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{FiscaError, FiscaResult};
use crate::export::{export_declarations_csv, export_declarations_json, export_declarations_yaml};
use crate::services::DeclarationService;
use crate::storage::Storage;

use super::declaration::FilterArgs;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// JSON with schema version and metadata
    Json,
    /// CSV, one line per table row
    Csv,
    /// YAML, human-readable
    Yaml,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write JSON on a single line
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

fn write_export<W: Write>(
    format: ExportFormat,
    declarations: &[crate::models::Declaration],
    filtered: bool,
    compact: bool,
    writer: &mut W,
) -> FiscaResult<()> {
    match format {
        ExportFormat::Json => {
            export_declarations_json(declarations, filtered, writer, !compact)?;
            writeln!(writer).map_err(|e| FiscaError::Export(e.to_string()))?;
        }
        ExportFormat::Csv => export_declarations_csv(declarations, writer)?,
        ExportFormat::Yaml => export_declarations_yaml(declarations, filtered, writer)?,
    }
    writer.flush().map_err(|e| FiscaError::Export(e.to_string()))
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> FiscaResult<()> {
    let filter = args.filter.to_filter()?;
    let declarations = DeclarationService::new(storage).list(&filter)?;

    match &args.output {
        Some(output) => {
            let file = File::create(output).map_err(|e| {
                FiscaError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);
            write_export(
                args.format,
                &declarations,
                filter.is_active(),
                args.compact,
                &mut writer,
            )?;
            println!(
                "Exported {} declaration(s) to: {}",
                declarations.len(),
                output.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            write_export(
                args.format,
                &declarations,
                filter.is_active(),
                args.compact,
                &mut writer,
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FiscaPaths;
    use crate::models::{DeclarationBody, DeclarationDraft, EncaissementRow, Period};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FiscaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_export_to_file() {
        let (temp_dir, storage) = create_test_storage();
        DeclarationService::new(&storage)
            .create(DeclarationDraft::new(
                "DR Alger",
                Period::new("05", "2025"),
                DeclarationBody::Encaissement(vec![EncaissementRow {
                    label: "Ventes".into(),
                    gross_amount: "1190".into(),
                }]),
            ))
            .unwrap();

        let output = temp_dir.path().join("out.csv");
        handle_export_command(
            &storage,
            ExportArgs {
                format: ExportFormat::Csv,
                output: Some(output.clone()),
                compact: false,
                filter: FilterArgs::default(),
            },
        )
        .unwrap();

        let text = std::fs::read_to_string(output).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("DR Alger"));
    }

    #[test]
    fn test_compact_json_is_one_line() {
        let mut output = Vec::new();
        write_export(ExportFormat::Json, &[], false, true, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
    }
}
