//! Declaration categories
//!
//! Each declaration belongs to exactly one of six categories. The category
//! decides which table the declaration carries and how it is presented
//! (label, print title, accent colour).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The six declaration categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationCategory {
    /// Cash receipts, tax-inclusive
    Encaissement,
    /// VAT statement on fixed assets
    VatFixedAsset,
    /// VAT statement on goods and services
    VatGoodsServices,
    /// Stamp duty statement
    StampDuty,
    /// Turnover tax at 7% and global 1%
    TurnoverTax,
    /// Professional-activity tax per wilaya/commune
    Tap,
}

impl DeclarationCategory {
    /// All categories in classification priority order
    pub const ALL: [DeclarationCategory; 6] = [
        DeclarationCategory::Encaissement,
        DeclarationCategory::VatFixedAsset,
        DeclarationCategory::VatGoodsServices,
        DeclarationCategory::StampDuty,
        DeclarationCategory::TurnoverTax,
        DeclarationCategory::Tap,
    ];

    /// Stable machine key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Encaissement => "encaissement",
            Self::VatFixedAsset => "vat_fixed_asset",
            Self::VatGoodsServices => "vat_goods_services",
            Self::StampDuty => "stamp_duty",
            Self::TurnoverTax => "turnover_tax",
            Self::Tap => "tap",
        }
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Encaissement => "Encaissement",
            Self::VatFixedAsset => "TVA / IMMO",
            Self::VatGoodsServices => "TVA / Biens & Serv",
            Self::StampDuty => "Droits Timbre",
            Self::TurnoverTax => "CA 7% & CA Glob 1%",
            Self::Tap => "ETAT TAP",
        }
    }

    /// Title used on printed statements
    pub fn title(&self) -> &'static str {
        match self {
            Self::Encaissement => "ENCAISSEMENT",
            Self::VatFixedAsset => "ÉTAT TVA / IMMOBILISATIONS",
            Self::VatGoodsServices => "ÉTAT TVA / BIENS & SERVICES",
            Self::StampDuty => "ÉTAT DROITS DE TIMBRE",
            Self::TurnoverTax => "CA 7% & CA GLOBAL 1%",
            Self::Tap => "ÉTAT TAP",
        }
    }

    /// Accent colour (hex)
    pub fn color(&self) -> &'static str {
        match self {
            Self::Encaissement => "#2db34b",
            Self::VatFixedAsset => "#1d6fb8",
            Self::VatGoodsServices => "#7c3aed",
            Self::StampDuty => "#0891b2",
            Self::TurnoverTax => "#ea580c",
            Self::Tap => "#be123c",
        }
    }

    /// Field order of one table row for this category
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Encaissement => &["label", "gross_amount"],
            Self::VatFixedAsset | Self::VatGoodsServices => &[
                "counterparty_name",
                "tax_id",
                "address",
                "registry_number",
                "invoice_date",
                "invoice_ref",
                "net_amount",
                "deductible_vat",
                "nature",
            ],
            Self::StampDuty => &["label", "cash_gross_revenue", "stamp_duty"],
            Self::TurnoverTax => &["base_7_percent", "base_global_1_percent"],
            Self::Tap => &["region_code", "municipality", "tap_amount"],
        }
    }
}

impl fmt::Display for DeclarationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned for an unknown category name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown declaration category '{0}' (expected one of: encaissement, vat_fixed_asset, vat_goods_services, stamp_duty, turnover_tax, tap)")]
pub struct ParseCategoryError(pub String);

impl FromStr for DeclarationCategory {
    type Err = ParseCategoryError;

    /// Accepts the stable keys and the portal's tab keys
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "encaissement" => Ok(Self::Encaissement),
            "vat_fixed_asset" | "tva_immo" => Ok(Self::VatFixedAsset),
            "vat_goods_services" | "tva_biens" => Ok(Self::VatGoodsServices),
            "stamp_duty" | "droits_timbre" => Ok(Self::StampDuty),
            "turnover_tax" | "ca_tap" => Ok(Self::TurnoverTax),
            "tap" | "etat_tap" => Ok(Self::Tap),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// Outcome of inspecting which field group of a stored record is populated
///
/// Serialized as its key, so entries written before undefined records were
/// kept still read back as a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Classification {
    Category(DeclarationCategory),
    /// No group populated; only reachable through malformed stored data
    Undefined,
}

impl From<DeclarationCategory> for Classification {
    fn from(category: DeclarationCategory) -> Self {
        Self::Category(category)
    }
}

impl From<Classification> for String {
    fn from(classification: Classification) -> Self {
        classification.key().to_string()
    }
}

impl TryFrom<String> for Classification {
    type Error = ParseCategoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case("undefined") {
            return Ok(Self::Undefined);
        }
        value.parse().map(Self::Category)
    }
}

impl Classification {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Category(c) => c.key(),
            Self::Undefined => "undefined",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Category(c) => c.label(),
            Self::Undefined => "Non défini",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Category(c) => c.title(),
            Self::Undefined => "DÉCLARATION NON DÉFINIE",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Category(c) => c.color(),
            Self::Undefined => "#6b7280",
        }
    }

    pub fn category(&self) -> Option<DeclarationCategory> {
        match self {
            Self::Category(c) => Some(*c),
            Self::Undefined => None,
        }
    }
}
