//! Declaration model
//!
//! In memory a declaration carries exactly one category table, expressed as
//! a [`DeclarationBody`] variant. On disk the record keeps the flat layout
//! written by the browser portal (all six groups present, five of them
//! empty), so [`Declaration`] serializes through [`FlatDeclaration`].

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::amount::RawAmount;
use super::category::{Classification, DeclarationCategory};
use super::ids::DeclarationId;
use super::period::{is_valid_month, Period};

/// One cash-receipt line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncaissementRow {
    #[serde(rename = "designation")]
    pub label: String,
    /// Tax-inclusive amount
    #[serde(rename = "ttc")]
    pub gross_amount: RawAmount,
}

/// One invoice line of a VAT statement
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VatRow {
    #[serde(rename = "nomRaisonSociale")]
    pub counterparty_name: String,
    #[serde(rename = "idFiscal")]
    pub tax_id: String,
    #[serde(rename = "adresse")]
    pub address: String,
    #[serde(rename = "numRC")]
    pub registry_number: String,
    #[serde(rename = "dateFacture")]
    pub invoice_date: String,
    #[serde(rename = "refFacture")]
    pub invoice_ref: String,
    #[serde(rename = "montantHT")]
    pub net_amount: RawAmount,
    #[serde(rename = "tvaDeductible")]
    pub deductible_vat: RawAmount,
    /// Nature code as stored; see [`NatureCode`]
    pub nature: String,
}

impl VatRow {
    pub fn nature_code(&self) -> Option<NatureCode> {
        self.nature.parse().ok()
    }
}

/// One stamp-duty line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StampDutyRow {
    #[serde(rename = "designation")]
    pub label: String,
    /// Cash turnover, tax-inclusive
    #[serde(rename = "caTTCEsp")]
    pub cash_gross_revenue: RawAmount,
    #[serde(rename = "droitTimbre")]
    pub stamp_duty: RawAmount,
}

/// The two turnover-tax bases
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnoverBases {
    /// Base taxed at 7%
    pub base_7_percent: RawAmount,
    /// Base taxed at the global 1% rate
    pub base_global_1_percent: RawAmount,
}

impl TurnoverBases {
    pub fn is_empty(&self) -> bool {
        self.base_7_percent.is_blank() && self.base_global_1_percent.is_blank()
    }
}

/// One professional-activity tax line
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TapRow {
    /// Two-digit wilaya code
    #[serde(rename = "wilayaCode")]
    pub region_code: String,
    #[serde(rename = "commune")]
    pub municipality: String,
    #[serde(rename = "tap2")]
    pub tap_amount: RawAmount,
}

/// Nature of a VAT invoice line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NatureCode {
    /// Depreciable asset
    BienAmortissable,
    Autre,
}

impl NatureCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BienAmortissable => "bien_amortissable",
            Self::Autre => "autre",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BienAmortissable => "Bien amortissable",
            Self::Autre => "Autre",
        }
    }
}

impl FromStr for NatureCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "bien_amortissable" => Ok(Self::BienAmortissable),
            "autre" => Ok(Self::Autre),
            _ => Err(()),
        }
    }
}

/// The category table of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationBody {
    Encaissement(Vec<EncaissementRow>),
    VatFixedAsset(Vec<VatRow>),
    VatGoodsServices(Vec<VatRow>),
    StampDuty(Vec<StampDutyRow>),
    TurnoverTax(TurnoverBases),
    Tap(Vec<TapRow>),
    /// A stored record with no populated group
    Undefined,
}

/// Amount columns, validated strictly at save time
const AMOUNT_FIELDS: [&str; 8] = [
    "gross_amount",
    "net_amount",
    "deductible_vat",
    "cash_gross_revenue",
    "stamp_duty",
    "base_7_percent",
    "base_global_1_percent",
    "tap_amount",
];

/// Whether a column holds an amount
pub fn is_amount_field(field: &str) -> bool {
    AMOUNT_FIELDS.contains(&field)
}

impl DeclarationBody {
    pub fn category(&self) -> Classification {
        let category = match self {
            Self::Encaissement(_) => DeclarationCategory::Encaissement,
            Self::VatFixedAsset(_) => DeclarationCategory::VatFixedAsset,
            Self::VatGoodsServices(_) => DeclarationCategory::VatGoodsServices,
            Self::StampDuty(_) => DeclarationCategory::StampDuty,
            Self::TurnoverTax(_) => DeclarationCategory::TurnoverTax,
            Self::Tap(_) => DeclarationCategory::Tap,
            Self::Undefined => return Classification::Undefined,
        };
        Classification::Category(category)
    }

    /// Number of table rows (the turnover table counts as one)
    pub fn row_count(&self) -> usize {
        match self {
            Self::Encaissement(rows) => rows.len(),
            Self::VatFixedAsset(rows) | Self::VatGoodsServices(rows) => rows.len(),
            Self::StampDuty(rows) => rows.len(),
            Self::TurnoverTax(bases) => usize::from(!bases.is_empty()),
            Self::Tap(rows) => rows.len(),
            Self::Undefined => 0,
        }
    }

    /// The table as `(column, text)` cells, in [`DeclarationCategory::columns`] order
    pub fn table(&self) -> Vec<Vec<(&'static str, &str)>> {
        match self {
            Self::Encaissement(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        ("label", r.label.as_str()),
                        ("gross_amount", r.gross_amount.as_str()),
                    ]
                })
                .collect(),
            Self::VatFixedAsset(rows) | Self::VatGoodsServices(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        ("counterparty_name", r.counterparty_name.as_str()),
                        ("tax_id", r.tax_id.as_str()),
                        ("address", r.address.as_str()),
                        ("registry_number", r.registry_number.as_str()),
                        ("invoice_date", r.invoice_date.as_str()),
                        ("invoice_ref", r.invoice_ref.as_str()),
                        ("net_amount", r.net_amount.as_str()),
                        ("deductible_vat", r.deductible_vat.as_str()),
                        ("nature", r.nature.as_str()),
                    ]
                })
                .collect(),
            Self::StampDuty(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        ("label", r.label.as_str()),
                        ("cash_gross_revenue", r.cash_gross_revenue.as_str()),
                        ("stamp_duty", r.stamp_duty.as_str()),
                    ]
                })
                .collect(),
            Self::TurnoverTax(bases) => vec![vec![
                ("base_7_percent", bases.base_7_percent.as_str()),
                ("base_global_1_percent", bases.base_global_1_percent.as_str()),
            ]],
            Self::Tap(rows) => rows
                .iter()
                .map(|r| {
                    vec![
                        ("region_code", r.region_code.as_str()),
                        ("municipality", r.municipality.as_str()),
                        ("tap_amount", r.tap_amount.as_str()),
                    ]
                })
                .collect(),
            Self::Undefined => Vec::new(),
        }
    }

    /// Build a body from positional cells, one `Vec` per row
    ///
    /// Cells are trimmed. Column order follows
    /// [`DeclarationCategory::columns`]. Content is not validated here,
    /// see [`DeclarationDraft::validate`].
    pub fn from_table(
        category: DeclarationCategory,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, DeclarationValidationError> {
        let expected = category.columns().len();
        let mut cells_by_row = Vec::with_capacity(rows.len());
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != expected {
                return Err(DeclarationValidationError::ColumnCount {
                    row: idx + 1,
                    expected,
                    found: row.len(),
                });
            }
            let cells: Vec<String> = row.into_iter().map(|c| c.trim().to_string()).collect();
            cells_by_row.push(cells);
        }

        let body = match category {
            DeclarationCategory::Encaissement => Self::Encaissement(
                cells_by_row
                    .into_iter()
                    .map(|c| {
                        let mut c = c.into_iter();
                        EncaissementRow {
                            label: next_cell(&mut c),
                            gross_amount: next_cell(&mut c).into(),
                        }
                    })
                    .collect(),
            ),
            DeclarationCategory::VatFixedAsset | DeclarationCategory::VatGoodsServices => {
                let rows: Vec<VatRow> = cells_by_row.into_iter().map(vat_row_from_cells).collect();
                if category == DeclarationCategory::VatFixedAsset {
                    Self::VatFixedAsset(rows)
                } else {
                    Self::VatGoodsServices(rows)
                }
            }
            DeclarationCategory::StampDuty => Self::StampDuty(
                cells_by_row
                    .into_iter()
                    .map(|c| {
                        let mut c = c.into_iter();
                        StampDutyRow {
                            label: next_cell(&mut c),
                            cash_gross_revenue: next_cell(&mut c).into(),
                            stamp_duty: next_cell(&mut c).into(),
                        }
                    })
                    .collect(),
            ),
            DeclarationCategory::TurnoverTax => {
                if cells_by_row.len() > 1 {
                    return Err(DeclarationValidationError::SingleRowExpected {
                        found: cells_by_row.len(),
                    });
                }
                match cells_by_row.into_iter().next() {
                    Some(c) => {
                        let mut c = c.into_iter();
                        Self::TurnoverTax(TurnoverBases {
                            base_7_percent: next_cell(&mut c).into(),
                            base_global_1_percent: next_cell(&mut c).into(),
                        })
                    }
                    None => Self::TurnoverTax(TurnoverBases::default()),
                }
            }
            DeclarationCategory::Tap => Self::Tap(
                cells_by_row
                    .into_iter()
                    .map(|c| {
                        let mut c = c.into_iter();
                        TapRow {
                            region_code: next_cell(&mut c),
                            municipality: next_cell(&mut c),
                            tap_amount: next_cell(&mut c).into(),
                        }
                    })
                    .collect(),
            ),
        };
        Ok(body)
    }
}

fn next_cell(cells: &mut impl Iterator<Item = String>) -> String {
    cells.next().unwrap_or_default()
}

fn vat_row_from_cells(cells: Vec<String>) -> VatRow {
    let mut c = cells.into_iter();
    VatRow {
        counterparty_name: next_cell(&mut c),
        tax_id: next_cell(&mut c),
        address: next_cell(&mut c),
        registry_number: next_cell(&mut c),
        invoice_date: next_cell(&mut c),
        invoice_ref: next_cell(&mut c),
        net_amount: next_cell(&mut c).into(),
        deductible_vat: next_cell(&mut c).into(),
        nature: next_cell(&mut c),
    }
}

/// Validation failures for a declaration about to be saved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationValidationError {
    #[error("Direction is required")]
    MissingDirection,

    #[error("Month is required")]
    MissingMonth,

    #[error("Year is required")]
    MissingYear,

    #[error("Invalid month '{0}' (expected 01 to 12)")]
    InvalidMonth(String),

    #[error("The table must contain at least one row")]
    NoRows,

    #[error("All fields must be filled (row {row}, field '{field}' is empty)")]
    EmptyCell { row: usize, field: &'static str },

    #[error("Invalid amount '{value}' (row {row}, field '{field}')")]
    InvalidAmount {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Invalid nature '{value}' in row {row} (expected bien_amortissable or autre)")]
    InvalidNature { row: usize, value: String },

    #[error("Invalid wilaya code '{value}' in row {row} (expected two digits)")]
    InvalidWilayaCode { row: usize, value: String },

    #[error("Row {row} has {found} fields, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("The turnover table takes a single row, got {found}")]
    SingleRowExpected { found: usize },
}

/// A declaration as entered, before it is saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationDraft {
    pub direction: String,
    pub period: Period,
    pub body: DeclarationBody,
}

impl DeclarationDraft {
    pub fn new(direction: impl Into<String>, period: Period, body: DeclarationBody) -> Self {
        Self {
            direction: direction.into(),
            period,
            body,
        }
    }

    /// Check the draft; the first failure wins
    pub fn validate(&self) -> Result<(), DeclarationValidationError> {
        if self.direction.trim().is_empty() {
            return Err(DeclarationValidationError::MissingDirection);
        }
        if self.period.month.trim().is_empty() {
            return Err(DeclarationValidationError::MissingMonth);
        }
        if self.period.year.trim().is_empty() {
            return Err(DeclarationValidationError::MissingYear);
        }
        if !is_valid_month(&self.period.month) {
            return Err(DeclarationValidationError::InvalidMonth(
                self.period.month.clone(),
            ));
        }
        if self.body.row_count() == 0 {
            return Err(DeclarationValidationError::NoRows);
        }

        let table = self.body.table();

        // Completeness is checked over the whole table before content
        for (idx, row) in table.iter().enumerate() {
            for &(field, text) in row {
                if text.trim().is_empty() {
                    return Err(DeclarationValidationError::EmptyCell {
                        row: idx + 1,
                        field,
                    });
                }
            }
        }

        for (idx, row) in table.iter().enumerate() {
            let row_no = idx + 1;
            for &(field, text) in row {
                if is_amount_field(field) && RawAmount::new(text).parse().is_err() {
                    return Err(DeclarationValidationError::InvalidAmount {
                        row: row_no,
                        field,
                        value: text.trim().to_string(),
                    });
                }
                if field == "nature" && text.parse::<NatureCode>().is_err() {
                    return Err(DeclarationValidationError::InvalidNature {
                        row: row_no,
                        value: text.trim().to_string(),
                    });
                }
                if field == "region_code" && !is_wilaya_code(text) {
                    return Err(DeclarationValidationError::InvalidWilayaCode {
                        row: row_no,
                        value: text.trim().to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Turn a validated draft into a record with a fresh id and a timestamp
    /// at the millisecond precision it is stored with
    pub fn into_declaration(self) -> Declaration {
        Declaration {
            id: DeclarationId::new(),
            created_at: Some(Utc::now().trunc_subsecs(3)),
            direction: self.direction.trim().to_string(),
            period: self.period,
            body: self.body,
        }
    }
}

fn is_wilaya_code(text: &str) -> bool {
    let text = text.trim();
    text.len() == 2 && text.bytes().all(|b| b.is_ascii_digit())
}

/// A saved declaration
///
/// Decoding never fails: a record with no populated group gets an
/// [`DeclarationBody::Undefined`] body and an unreadable creation time
/// becomes `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FlatDeclaration", into = "FlatDeclaration")]
pub struct Declaration {
    pub id: DeclarationId,
    pub created_at: Option<DateTime<Utc>>,
    pub direction: String,
    pub period: Period,
    pub body: DeclarationBody,
}

impl Declaration {
    pub fn category(&self) -> Classification {
        self.body.category()
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self.body, DeclarationBody::Undefined)
    }

    /// Category-specific headline amount, see [`crate::tax::representative_total`]
    pub fn representative_total(&self) -> f64 {
        crate::tax::representative_total(&self.body)
    }
}

/// The stored record layout
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlatDeclaration {
    pub id: String,
    pub created_at: String,
    pub direction: String,
    #[serde(rename = "mois")]
    pub month: String,
    #[serde(rename = "annee")]
    pub year: String,
    pub enc_rows: Vec<EncaissementRow>,
    pub tva_immo_rows: Vec<VatRow>,
    pub tva_biens_rows: Vec<VatRow>,
    pub timbre_rows: Vec<StampDutyRow>,
    pub b12: RawAmount,
    pub b13: RawAmount,
    pub tap_rows: Vec<TapRow>,
}

/// Decide which group of a stored record is populated
///
/// Groups are checked in a fixed priority order; the first non-empty one
/// wins even if later groups also carry data.
pub fn classify(record: &FlatDeclaration) -> Classification {
    if !record.enc_rows.is_empty() {
        Classification::Category(DeclarationCategory::Encaissement)
    } else if !record.tva_immo_rows.is_empty() {
        Classification::Category(DeclarationCategory::VatFixedAsset)
    } else if !record.tva_biens_rows.is_empty() {
        Classification::Category(DeclarationCategory::VatGoodsServices)
    } else if !record.timbre_rows.is_empty() {
        Classification::Category(DeclarationCategory::StampDuty)
    } else if !record.b12.is_blank() || !record.b13.is_blank() {
        Classification::Category(DeclarationCategory::TurnoverTax)
    } else if !record.tap_rows.is_empty() {
        Classification::Category(DeclarationCategory::Tap)
    } else {
        Classification::Undefined
    }
}

impl From<FlatDeclaration> for Declaration {
    fn from(flat: FlatDeclaration) -> Self {
        let created_at = DateTime::parse_from_rfc3339(flat.created_at.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok();

        let body = match classify(&flat) {
            Classification::Category(DeclarationCategory::Encaissement) => {
                DeclarationBody::Encaissement(flat.enc_rows)
            }
            Classification::Category(DeclarationCategory::VatFixedAsset) => {
                DeclarationBody::VatFixedAsset(flat.tva_immo_rows)
            }
            Classification::Category(DeclarationCategory::VatGoodsServices) => {
                DeclarationBody::VatGoodsServices(flat.tva_biens_rows)
            }
            Classification::Category(DeclarationCategory::StampDuty) => {
                DeclarationBody::StampDuty(flat.timbre_rows)
            }
            Classification::Category(DeclarationCategory::TurnoverTax) => {
                DeclarationBody::TurnoverTax(TurnoverBases {
                    base_7_percent: flat.b12,
                    base_global_1_percent: flat.b13,
                })
            }
            Classification::Category(DeclarationCategory::Tap) => DeclarationBody::Tap(flat.tap_rows),
            Classification::Undefined => DeclarationBody::Undefined,
        };

        Declaration {
            id: DeclarationId::from(flat.id),
            created_at,
            direction: flat.direction,
            period: Period {
                month: flat.month,
                year: flat.year,
            },
            body,
        }
    }
}

impl From<Declaration> for FlatDeclaration {
    fn from(decl: Declaration) -> Self {
        let mut flat = FlatDeclaration {
            id: decl.id.as_str().to_string(),
            created_at: decl
                .created_at
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
                .unwrap_or_default(),
            direction: decl.direction,
            month: decl.period.month,
            year: decl.period.year,
            ..FlatDeclaration::default()
        };
        match decl.body {
            DeclarationBody::Encaissement(rows) => flat.enc_rows = rows,
            DeclarationBody::VatFixedAsset(rows) => flat.tva_immo_rows = rows,
            DeclarationBody::VatGoodsServices(rows) => flat.tva_biens_rows = rows,
            DeclarationBody::StampDuty(rows) => flat.timbre_rows = rows,
            DeclarationBody::TurnoverTax(bases) => {
                flat.b12 = bases.base_7_percent;
                flat.b13 = bases.base_global_1_percent;
            }
            DeclarationBody::Tap(rows) => flat.tap_rows = rows,
            DeclarationBody::Undefined => {}
        }
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(row: &[&str]) -> Vec<String> {
        row.iter().map(|s| s.to_string()).collect()
    }

    fn encaissement_draft(direction: &str, amount: &str) -> DeclarationDraft {
        DeclarationDraft::new(
            direction,
            Period::new("03", "2025"),
            DeclarationBody::Encaissement(vec![EncaissementRow {
                label: "Ventes".into(),
                gross_amount: amount.into(),
            }]),
        )
    }

    #[test]
    fn test_classify_priority() {
        let mut flat = FlatDeclaration {
            tap_rows: vec![TapRow::default()],
            ..Default::default()
        };
        assert_eq!(
            classify(&flat),
            Classification::Category(DeclarationCategory::Tap)
        );

        flat.b13 = "10".into();
        assert_eq!(
            classify(&flat),
            Classification::Category(DeclarationCategory::TurnoverTax)
        );

        flat.enc_rows.push(EncaissementRow::default());
        assert_eq!(
            classify(&flat),
            Classification::Category(DeclarationCategory::Encaissement)
        );
    }

    #[test]
    fn test_classify_empty_record_is_undefined() {
        assert_eq!(
            classify(&FlatDeclaration::default()),
            Classification::Undefined
        );
    }

    #[test]
    fn test_decode_portal_record() {
        let json = r#"{
            "id": "1712345678901",
            "createdAt": "2025-03-14T09:30:00.000Z",
            "direction": "DR Alger",
            "mois": "03",
            "annee": "2025",
            "encRows": [],
            "tvaImmoRows": [],
            "tvaBiensRows": [],
            "timbreRows": [],
            "b12": "",
            "b13": "",
            "tapRows": [{"wilayaCode": "16", "commune": "Bab El Oued", "tap2": "50"}]
        }"#;
        let decl: Declaration = serde_json::from_str(json).unwrap();
        assert_eq!(decl.id.as_str(), "1712345678901");
        assert_eq!(
            decl.category(),
            Classification::Category(DeclarationCategory::Tap)
        );
        assert!(decl.created_at.is_some());
        assert_eq!(decl.period, Period::new("03", "2025"));
        match &decl.body {
            DeclarationBody::Tap(rows) => {
                assert_eq!(rows[0].region_code, "16");
                assert_eq!(rows[0].tap_amount.as_str(), "50");
            }
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_decode_keeps_undefined_record() {
        let json = r#"{"id": "x", "createdAt": "2025-03-14T09:30:00.000Z"}"#;
        let decl: Declaration = serde_json::from_str(json).unwrap();
        assert_eq!(decl.id.as_str(), "x");
        assert!(decl.is_undefined());
        assert_eq!(decl.category().key(), "undefined");
        assert_eq!(decl.body.row_count(), 0);
        assert!(decl.body.table().is_empty());
    }

    #[test]
    fn test_decode_keeps_record_with_bad_timestamp() {
        let json = r#"{"id": "y", "createdAt": "hier", "b12": "100", "b13": "5"}"#;
        let decl: Declaration = serde_json::from_str(json).unwrap();
        assert!(decl.created_at.is_none());
        assert_eq!(
            decl.category(),
            Classification::Category(DeclarationCategory::TurnoverTax)
        );

        let value = serde_json::to_value(&decl).unwrap();
        assert_eq!(value["createdAt"], "");
        assert_eq!(value["b12"], "100");
    }

    #[test]
    fn test_undefined_draft_is_rejected() {
        let draft = DeclarationDraft::new("DR", Period::new("01", "2025"), DeclarationBody::Undefined);
        assert_eq!(draft.validate(), Err(DeclarationValidationError::NoRows));
    }

    #[test]
    fn test_stored_layout_keeps_all_groups() {
        let decl = encaissement_draft("DR Oran", "1190").into_declaration();
        let value = serde_json::to_value(&decl).unwrap();
        assert_eq!(value["mois"], "03");
        assert_eq!(value["annee"], "2025");
        assert_eq!(value["encRows"][0]["ttc"], "1190");
        assert_eq!(value["tapRows"], serde_json::json!([]));
        assert_eq!(value["b12"], "");

        let back: Declaration = serde_json::from_value(value).unwrap();
        assert_eq!(back.id, decl.id);
        assert_eq!(back.body, decl.body);
    }

    #[test]
    fn test_validate_direction_first() {
        let draft = encaissement_draft("   ", "");
        assert_eq!(
            draft.validate(),
            Err(DeclarationValidationError::MissingDirection)
        );
    }

    #[test]
    fn test_validate_period() {
        let mut draft = encaissement_draft("DR", "10");
        draft.period.month.clear();
        assert_eq!(draft.validate(), Err(DeclarationValidationError::MissingMonth));

        draft.period = Period::new("13", "2025");
        assert!(matches!(
            draft.validate(),
            Err(DeclarationValidationError::InvalidMonth(_))
        ));

        draft.period = Period::new("01", "");
        assert_eq!(draft.validate(), Err(DeclarationValidationError::MissingYear));
    }

    #[test]
    fn test_validate_empty_cell_and_amount() {
        let draft = encaissement_draft("DR", "");
        assert_eq!(
            draft.validate(),
            Err(DeclarationValidationError::EmptyCell {
                row: 1,
                field: "gross_amount"
            })
        );

        let draft = encaissement_draft("DR", "12abc");
        assert!(matches!(
            draft.validate(),
            Err(DeclarationValidationError::InvalidAmount { row: 1, .. })
        ));

        assert!(encaissement_draft("DR", "1190").validate().is_ok());
    }

    #[test]
    fn test_validate_no_rows() {
        let draft = DeclarationDraft::new(
            "DR",
            Period::new("01", "2025"),
            DeclarationBody::StampDuty(vec![]),
        );
        assert_eq!(draft.validate(), Err(DeclarationValidationError::NoRows));
    }

    #[test]
    fn test_turnover_requires_both_bases() {
        let body = DeclarationBody::TurnoverTax(TurnoverBases {
            base_7_percent: "100".into(),
            base_global_1_percent: "".into(),
        });
        let draft = DeclarationDraft::new("DR", Period::new("01", "2025"), body);
        assert_eq!(
            draft.validate(),
            Err(DeclarationValidationError::EmptyCell {
                row: 1,
                field: "base_global_1_percent"
            })
        );
    }

    #[test]
    fn test_from_table_vat_and_nature() {
        let body = DeclarationBody::from_table(
            DeclarationCategory::VatGoodsServices,
            vec![cells(&[
                "SARL Alpha",
                "000116001234567",
                "Rue 1, Alger",
                "16/00-1234567B12",
                "2025-03-02",
                "FA-001",
                "1000",
                "190",
                "autre",
            ])],
        )
        .unwrap();
        assert_eq!(
            body.category(),
            Classification::Category(DeclarationCategory::VatGoodsServices)
        );
        let draft = DeclarationDraft::new("DR", Period::new("03", "2025"), body);
        assert!(draft.validate().is_ok());

        let bad = DeclarationBody::from_table(
            DeclarationCategory::VatFixedAsset,
            vec![cells(&["a", "b", "c", "d", "e", "f", "1", "2", "meuble"])],
        )
        .unwrap();
        let draft = DeclarationDraft::new("DR", Period::new("03", "2025"), bad);
        assert!(matches!(
            draft.validate(),
            Err(DeclarationValidationError::InvalidNature { row: 1, .. })
        ));
    }

    #[test]
    fn test_from_table_column_count() {
        let err = DeclarationBody::from_table(
            DeclarationCategory::Tap,
            vec![cells(&["16", "Alger Centre"])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            DeclarationValidationError::ColumnCount {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_tap_wilaya_code_checked() {
        let body = DeclarationBody::from_table(
            DeclarationCategory::Tap,
            vec![cells(&["160", "Alger Centre", "50"])],
        )
        .unwrap();
        let draft = DeclarationDraft::new("DR", Period::new("03", "2025"), body);
        assert!(matches!(
            draft.validate(),
            Err(DeclarationValidationError::InvalidWilayaCode { .. })
        ));
    }

    #[test]
    fn test_turnover_single_row() {
        let err = DeclarationBody::from_table(
            DeclarationCategory::TurnoverTax,
            vec![cells(&["1", "2"]), cells(&["3", "4"])],
        )
        .unwrap_err();
        assert_eq!(err, DeclarationValidationError::SingleRowExpected { found: 2 });
    }
}
