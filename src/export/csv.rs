//! CSV Export functionality
//!
//! Each table row of each declaration becomes one CSV line. Category
//! columns are merged into one shared header; cells a category does not
//! have are left empty.

use std::io::Write;

use crate::error::{FiscaError, FiscaResult};
use crate::models::Declaration;

/// Leading columns identifying the declaration
const RECORD_COLUMNS: [&str; 7] = [
    "id",
    "created_at",
    "direction",
    "month",
    "year",
    "category",
    "row",
];

/// Table columns shared by all categories
pub const CSV_COLUMNS: [&str; 18] = [
    "label",
    "counterparty_name",
    "tax_id",
    "address",
    "registry_number",
    "invoice_date",
    "invoice_ref",
    "nature",
    "region_code",
    "municipality",
    "gross_amount",
    "net_amount",
    "deductible_vat",
    "cash_gross_revenue",
    "stamp_duty",
    "base_7_percent",
    "base_global_1_percent",
    "tap_amount",
];

fn export_err(e: impl std::fmt::Display) -> FiscaError {
    FiscaError::Export(e.to_string())
}

/// Export declarations to CSV, one line per table row
pub fn export_declarations_csv<W: Write>(
    declarations: &[Declaration],
    writer: &mut W,
) -> FiscaResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(RECORD_COLUMNS.iter().chain(CSV_COLUMNS.iter()))
        .map_err(export_err)?;

    for decl in declarations {
        let created_at = decl
            .created_at
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();
        let mut table = decl.body.table();
        // A record with no table still gets one line, with no row number
        let numbered = !table.is_empty();
        if !numbered {
            table.push(Vec::new());
        }
        for (idx, row) in table.iter().enumerate() {
            let row_number = if numbered {
                (idx + 1).to_string()
            } else {
                String::new()
            };
            let mut record: Vec<&str> = vec![
                decl.id.as_str(),
                created_at.as_str(),
                decl.direction.as_str(),
                decl.period.month.as_str(),
                decl.period.year.as_str(),
                decl.category().key(),
                row_number.as_str(),
            ];
            record.extend(CSV_COLUMNS.iter().map(|column| {
                row.iter()
                    .find(|(field, _)| field == column)
                    .map(|&(_, text)| text)
                    .unwrap_or("")
            }));
            csv_writer.write_record(&record).map_err(export_err)?;
        }
    }

    csv_writer.flush().map_err(export_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DeclarationBody, DeclarationCategory, DeclarationDraft, Period, TurnoverBases, VatRow,
    };

    fn read_back(output: &[u8]) -> Vec<csv::StringRecord> {
        csv::Reader::from_reader(output)
            .records()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_every_category_column_has_a_csv_column() {
        for category in DeclarationCategory::ALL {
            for column in category.columns() {
                assert!(CSV_COLUMNS.contains(column), "missing {}", column);
            }
        }
    }

    #[test]
    fn test_export_vat_rows() {
        let row = VatRow {
            counterparty_name: "SARL Atlas, Est".into(),
            tax_id: "0012".into(),
            address: "Rue 1".into(),
            registry_number: "RC9".into(),
            invoice_date: "2025-01-10".into(),
            invoice_ref: "F-1".into(),
            net_amount: "1000".into(),
            deductible_vat: "190".into(),
            nature: "autre".into(),
        };
        let decl = DeclarationDraft::new(
            "DR Annaba",
            Period::new("01", "2025"),
            DeclarationBody::VatGoodsServices(vec![row.clone(), row]),
        )
        .into_declaration();

        let mut output = Vec::new();
        export_declarations_csv(std::slice::from_ref(&decl), &mut output).unwrap();

        let text = String::from_utf8(output.clone()).unwrap();
        assert!(text.starts_with("id,created_at,direction,month,year,category,row,label"));
        assert!(text.contains("\"SARL Atlas, Est\""));

        let records = read_back(&output);
        assert_eq!(records.len(), 2);
        assert_eq!(&records[1][5], "vat_goods_services");
        assert_eq!(&records[1][6], "2");
        // net_amount
        assert_eq!(&records[0][7 + 11], "1000");
        // label is not a VAT column
        assert_eq!(&records[0][7], "");
    }

    #[test]
    fn test_export_turnover_single_line() {
        let decl = DeclarationDraft::new(
            "DR Blida",
            Period::new("06", "2024"),
            DeclarationBody::TurnoverTax(TurnoverBases {
                base_7_percent: "100".into(),
                base_global_1_percent: "200".into(),
            }),
        )
        .into_declaration();

        let mut output = Vec::new();
        export_declarations_csv(&[decl], &mut output).unwrap();

        let records = read_back(&output);
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][7 + 15], "100");
        assert_eq!(&records[0][7 + 16], "200");
    }

    #[test]
    fn test_export_undefined_record_single_line() {
        let decl: Declaration =
            serde_json::from_str(r#"{"id": "2", "direction": "DR Blida", "mois": "02", "annee": "2024"}"#)
                .unwrap();

        let mut output = Vec::new();
        export_declarations_csv(&[decl], &mut output).unwrap();

        let records = read_back(&output);
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "2");
        assert_eq!(&records[0][1], "");
        assert_eq!(&records[0][5], "undefined");
        assert_eq!(&records[0][6], "");
    }

    #[test]
    fn test_export_empty_writes_header() {
        let mut output = Vec::new();
        export_declarations_csv(&[], &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.trim_end().ends_with("tap_amount"));
    }
}
