//! CSV row import
//!
//! Reads the table of a declaration from a CSV file. The first line is
//! treated as a header when one of its cells names a column of the
//! category (the field name or the stored record name, case-insensitive).
//! Header columns may come in any order and extra columns are ignored.
//! Otherwise every line is data and cells are taken positionally.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{FiscaError, FiscaResult};
use crate::models::DeclarationCategory;

/// Stored record names accepted as header aliases
const STORED_NAMES: [(&str, &str); 18] = [
    ("label", "designation"),
    ("gross_amount", "ttc"),
    ("counterparty_name", "nomraisonsociale"),
    ("tax_id", "idfiscal"),
    ("address", "adresse"),
    ("registry_number", "numrc"),
    ("invoice_date", "datefacture"),
    ("invoice_ref", "reffacture"),
    ("net_amount", "montantht"),
    ("deductible_vat", "tvadeductible"),
    ("nature", "nature"),
    ("cash_gross_revenue", "cattcesp"),
    ("stamp_duty", "droittimbre"),
    ("base_7_percent", "b12"),
    ("base_global_1_percent", "b13"),
    ("region_code", "wilayacode"),
    ("municipality", "commune"),
    ("tap_amount", "tap2"),
];

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace('-', "_")
}

/// The column a header cell names, if any
fn column_for_header(category: DeclarationCategory, header: &str) -> Option<&'static str> {
    let header = normalize_header(header);
    category.columns().iter().copied().find(|column| {
        *column == header
            || STORED_NAMES
                .iter()
                .any(|(field, stored)| field == column && *stored == header)
    })
}

/// Map each category column to its index in the header, or `None` when the
/// record does not look like a header
fn header_mapping(
    category: DeclarationCategory,
    record: &StringRecord,
) -> FiscaResult<Option<Vec<usize>>> {
    let mut positions: HashMap<&'static str, usize> = HashMap::new();
    for (idx, cell) in record.iter().enumerate() {
        if let Some(column) = column_for_header(category, cell) {
            positions.entry(column).or_insert(idx);
        }
    }
    if positions.is_empty() {
        return Ok(None);
    }

    category
        .columns()
        .iter()
        .map(|column| {
            positions.get(column).copied().ok_or_else(|| {
                FiscaError::Import(format!(
                    "Missing column '{}' for {} rows",
                    column,
                    category.key()
                ))
            })
        })
        .collect::<FiscaResult<Vec<_>>>()
        .map(Some)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

/// Read table rows for a category from CSV data
pub fn read_rows<R: Read>(
    category: DeclarationCategory,
    reader: R,
    delimiter: u8,
) -> FiscaResult<Vec<Vec<String>>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut records = csv_reader.records();
    let mut rows = Vec::new();

    let first = match records.next() {
        Some(record) => record.map_err(|e| FiscaError::Import(e.to_string()))?,
        None => return Ok(rows),
    };
    let mapping = header_mapping(category, &first)?;

    let to_row = |record: &StringRecord| -> Vec<String> {
        match &mapping {
            Some(indices) => indices
                .iter()
                .map(|&i| record.get(i).unwrap_or("").to_string())
                .collect(),
            None => record.iter().map(str::to_string).collect(),
        }
    };

    if mapping.is_none() && !is_blank(&first) {
        rows.push(to_row(&first));
    }
    for record in records {
        let record = record.map_err(|e| FiscaError::Import(e.to_string()))?;
        if !is_blank(&record) {
            rows.push(to_row(&record));
        }
    }

    debug!(
        category = category.key(),
        rows = rows.len(),
        header = mapping.is_some(),
        "read rows from CSV"
    );
    Ok(rows)
}

/// Read table rows for a category from a CSV file
///
/// Files ending in `.tsv` are read tab-separated; a `;` delimiter is used
/// when the first line has semicolons but no commas.
pub fn read_rows_from_path(
    category: DeclarationCategory,
    path: &Path,
) -> FiscaResult<Vec<Vec<String>>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        FiscaError::Import(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let delimiter = detect_delimiter(path, &contents);
    read_rows(category, contents.as_bytes(), delimiter)
}

fn detect_delimiter(path: &Path, contents: &str) -> u8 {
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"))
    {
        return b'\t';
    }
    let first_line = contents.lines().next().unwrap_or("");
    if first_line.contains(';') && !first_line.contains(',') {
        b';'
    } else {
        b','
    }
}
