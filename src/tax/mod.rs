//! Tax arithmetic
//!
//! Pure conversions used by live totals, listings, filters and printed
//! statements. Inputs are read leniently, so an unreadable amount counts
//! as zero here; save-time validation is where bad input is rejected.

use crate::models::{
    DeclarationBody, EncaissementRow, RawAmount, StampDutyRow, TapRow, TurnoverBases, VatRow,
};

/// Multiplier from a tax-exclusive to a tax-inclusive amount (19% VAT)
pub const VAT_MULTIPLIER: f64 = 1.19;

/// Rate applied to the first turnover base
pub const TURNOVER_RATE_7: f64 = 0.07;

/// Rate applied to the global turnover base
pub const TURNOVER_RATE_GLOBAL_1: f64 = 0.01;

/// Tax-exclusive amount from a tax-inclusive one
pub fn exclusive_from_inclusive(gross: f64) -> f64 {
    gross / VAT_MULTIPLIER
}

/// VAT contained in a tax-inclusive amount
pub fn vat_portion(gross: f64) -> f64 {
    gross - exclusive_from_inclusive(gross)
}

pub fn fixed_rate_tax(base: f64, rate: f64) -> f64 {
    base * rate
}

fn sum<T>(rows: &[T], amount: impl Fn(&T) -> &RawAmount) -> f64 {
    rows.iter().map(|r| amount(r).value()).sum()
}

/// Totals of a cash-receipt table
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EncaissementTotals {
    pub gross: f64,
    pub net: f64,
    pub vat: f64,
}

impl EncaissementTotals {
    pub fn from_rows(rows: &[EncaissementRow]) -> Self {
        let gross = sum(rows, |r| &r.gross_amount);
        Self {
            gross,
            net: exclusive_from_inclusive(gross),
            vat: vat_portion(gross),
        }
    }
}

/// Totals of a VAT statement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VatTotals {
    pub net: f64,
    pub deductible: f64,
}

impl VatTotals {
    pub fn from_rows(rows: &[VatRow]) -> Self {
        Self {
            net: sum(rows, |r| &r.net_amount),
            deductible: sum(rows, |r| &r.deductible_vat),
        }
    }
}

/// Totals of a stamp-duty statement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StampDutyTotals {
    pub revenue: f64,
    pub duty: f64,
}

impl StampDutyTotals {
    pub fn from_rows(rows: &[StampDutyRow]) -> Self {
        Self {
            revenue: sum(rows, |r| &r.cash_gross_revenue),
            duty: sum(rows, |r| &r.stamp_duty),
        }
    }
}

/// Turnover-tax amounts for both bases
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TurnoverTotals {
    pub base_7: f64,
    pub tax_7: f64,
    pub base_1: f64,
    pub tax_1: f64,
}

impl TurnoverTotals {
    pub fn from_bases(bases: &TurnoverBases) -> Self {
        let base_7 = bases.base_7_percent.value();
        let base_1 = bases.base_global_1_percent.value();
        Self {
            base_7,
            tax_7: fixed_rate_tax(base_7, TURNOVER_RATE_7),
            base_1,
            tax_1: fixed_rate_tax(base_1, TURNOVER_RATE_GLOBAL_1),
        }
    }

    /// Sum of both bases, the printed statement's TOTAL line
    pub fn bases_total(&self) -> f64 {
        self.base_7 + self.base_1
    }

    pub fn tax_total(&self) -> f64 {
        self.tax_7 + self.tax_1
    }
}

pub fn tap_total(rows: &[TapRow]) -> f64 {
    sum(rows, |r| &r.tap_amount)
}

/// Headline amount of a declaration, used for listing and range filters
///
/// Cash receipts sum the gross amounts, VAT statements the net amounts,
/// stamp duty the duty column, turnover tax the computed tax of both
/// bases, and TAP the TAP amounts.
pub fn representative_total(body: &DeclarationBody) -> f64 {
    match body {
        DeclarationBody::Encaissement(rows) => EncaissementTotals::from_rows(rows).gross,
        DeclarationBody::VatFixedAsset(rows) | DeclarationBody::VatGoodsServices(rows) => {
            VatTotals::from_rows(rows).net
        }
        DeclarationBody::StampDuty(rows) => StampDutyTotals::from_rows(rows).duty,
        DeclarationBody::TurnoverTax(bases) => TurnoverTotals::from_bases(bases).tax_total(),
        DeclarationBody::Tap(rows) => tap_total(rows),
        DeclarationBody::Undefined => 0.0,
    }
}
