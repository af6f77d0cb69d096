//! Declaration display formatting
//!
//! Listing table, detail header and the per-category statement tables with
//! derived columns and a TOTAL footer.

use num_format::Locale;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::config::Settings;
use crate::models::{
    wilaya::wilaya_name, Declaration, DeclarationBody, EncaissementRow, RawAmount, StampDutyRow,
    TapRow, TurnoverBases, VatRow,
};
use crate::tax::{
    exclusive_from_inclusive, tap_total, vat_portion, EncaissementTotals, StampDutyTotals,
    TurnoverTotals, VatTotals, TURNOVER_RATE_7, TURNOVER_RATE_GLOBAL_1,
};

use super::amount::{format_amount, format_raw, PLACEHOLDER};

/// Number and date presentation
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub locale: Locale,
    /// strftime format for timestamps
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            locale: Locale::fr,
            date_format: "%d/%m/%Y %H:%M".to_string(),
        }
    }
}

impl DisplayOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            locale: settings.locale(),
            date_format: settings.date_format.clone(),
        }
    }

    fn amount(&self, value: f64) -> String {
        format_amount(value, &self.locale)
    }

    fn raw(&self, amount: &RawAmount) -> String {
        format_raw(amount, &self.locale)
    }

    /// Derived value of a cell, read leniently so rows agree with the totals
    fn derived(&self, amount: &RawAmount, f: impl Fn(f64) -> f64) -> String {
        self.amount(f(amount.value()))
    }

    /// Creation time in the configured format, or the placeholder when unknown
    fn recorded_at(&self, decl: &Declaration) -> String {
        match decl.created_at {
            Some(created_at) => created_at
                .with_timezone(&chrono::Local)
                .format(&self.date_format)
                .to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }
}

/// Render a builder as a bordered table with the given columns right-aligned
pub(super) fn render(builder: Builder, right_aligned: &[usize]) -> String {
    let mut table = builder.build();
    table.with(Style::modern());
    for &col in right_aligned {
        table.modify(Columns::single(col), Alignment::right());
    }
    table.to_string()
}

/// Message for an empty listing
pub fn empty_list_message(filter_active: bool) -> &'static str {
    if filter_active {
        "No declarations match the current filters."
    } else {
        "No declarations saved yet."
    }
}

/// Format declarations as a listing table, in the given order
pub fn format_declaration_list(declarations: &[Declaration], opts: &DisplayOptions) -> String {
    if declarations.is_empty() {
        return format!("{}\n", empty_list_message(false));
    }

    let mut builder = Builder::default();
    builder.push_record([
        "Catégorie",
        "Direction",
        "Mois",
        "Année",
        "Enregistré le",
        "Total",
        "ID",
    ]);

    for decl in declarations {
        builder.push_record([
            decl.category().label().to_string(),
            decl.direction.clone(),
            decl.period.month_label().to_string(),
            decl.period.year.clone(),
            opts.recorded_at(decl),
            opts.amount(decl.representative_total()),
            decl.id.short().to_string(),
        ]);
    }

    let mut output = render(builder, &[5]);
    output.push_str(&format!("\n{} declaration(s)\n", declarations.len()));
    output
}

/// Format the header and statement table of one declaration
pub fn format_declaration_details(decl: &Declaration, opts: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Declaration: {}\n", decl.id));
    output.push_str(&format!(
        "Category:    {} ({})\n",
        decl.category().label(),
        decl.category().key()
    ));
    output.push_str(&format!("Direction:   {}\n", decl.direction));
    output.push_str(&format!("Period:      {}\n", decl.period));
    output.push_str(&format!("Recorded:    {}\n", opts.recorded_at(decl)));
    output.push_str(&format!(
        "Total:       {}\n\n",
        opts.amount(decl.representative_total())
    ));
    output.push_str(&format_declaration_table(&decl.body, opts));
    output.push('\n');

    output
}

/// Format the statement table of a declaration body
pub fn format_declaration_table(body: &DeclarationBody, opts: &DisplayOptions) -> String {
    match body {
        DeclarationBody::Encaissement(rows) => encaissement_table(rows, opts),
        DeclarationBody::VatFixedAsset(rows) | DeclarationBody::VatGoodsServices(rows) => {
            vat_table(rows, opts)
        }
        DeclarationBody::StampDuty(rows) => stamp_duty_table(rows, opts),
        DeclarationBody::TurnoverTax(bases) => turnover_table(bases, opts),
        DeclarationBody::Tap(rows) => tap_table(rows, opts),
        DeclarationBody::Undefined => "No table: this record has no populated category.\n".to_string(),
    }
}

fn encaissement_table(rows: &[EncaissementRow], opts: &DisplayOptions) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Désignation", "Encaissement TTC", "TVA", "Encaissement HT"]);

    for (i, row) in rows.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            row.label.clone(),
            opts.raw(&row.gross_amount),
            opts.derived(&row.gross_amount, vat_portion),
            opts.derived(&row.gross_amount, exclusive_from_inclusive),
        ]);
    }

    let totals = EncaissementTotals::from_rows(rows);
    builder.push_record([
        String::new(),
        "TOTAL".to_string(),
        opts.amount(totals.gross),
        opts.amount(totals.vat),
        opts.amount(totals.net),
    ]);

    render(builder, &[2, 3, 4])
}

fn vat_table(rows: &[VatRow], opts: &DisplayOptions) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "#",
        "Nom / Raison Sociale",
        "ID Fiscal",
        "Adresse",
        "N° RC",
        "Date Fact.",
        "Réf.",
        "Montant HT",
        "TVA Déd.",
        "Nature",
    ]);

    for (i, row) in rows.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            row.counterparty_name.clone(),
            row.tax_id.clone(),
            row.address.clone(),
            row.registry_number.clone(),
            row.invoice_date.clone(),
            row.invoice_ref.clone(),
            opts.raw(&row.net_amount),
            opts.raw(&row.deductible_vat),
            row.nature_code()
                .map(|n| n.label().to_string())
                .unwrap_or_default(),
        ]);
    }

    let totals = VatTotals::from_rows(rows);
    let mut footer = vec![String::new(); 10];
    footer[6] = "TOTAL".to_string();
    footer[7] = opts.amount(totals.net);
    footer[8] = opts.amount(totals.deductible);
    builder.push_record(footer);

    render(builder, &[7, 8])
}

fn stamp_duty_table(rows: &[StampDutyRow], opts: &DisplayOptions) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Désignation", "CA TTC Esp.", "Droit de Timbre"]);

    for (i, row) in rows.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            row.label.clone(),
            opts.raw(&row.cash_gross_revenue),
            opts.raw(&row.stamp_duty),
        ]);
    }

    let totals = StampDutyTotals::from_rows(rows);
    builder.push_record([
        String::new(),
        "TOTAL".to_string(),
        opts.amount(totals.revenue),
        opts.amount(totals.duty),
    ]);

    render(builder, &[2, 3])
}

fn turnover_table(bases: &TurnoverBases, opts: &DisplayOptions) -> String {
    let totals = TurnoverTotals::from_bases(bases);
    let mut builder = Builder::default();
    builder.push_record([
        "Désignation",
        "Chiffre d'affaires HT",
        "Taux",
        "Montant Taxe à verser",
    ]);
    builder.push_record([
        "Chiffre d'affaires soumis à 7%".to_string(),
        opts.raw(&bases.base_7_percent),
        format_rate(TURNOVER_RATE_7),
        opts.derived(&bases.base_7_percent, |v| v * TURNOVER_RATE_7),
    ]);
    builder.push_record([
        "Chiffre d'affaires global soumis à 1%".to_string(),
        opts.raw(&bases.base_global_1_percent),
        format_rate(TURNOVER_RATE_GLOBAL_1),
        opts.derived(&bases.base_global_1_percent, |v| {
            v * TURNOVER_RATE_GLOBAL_1
        }),
    ]);
    builder.push_record([
        "TOTAL".to_string(),
        opts.amount(totals.bases_total()),
        String::new(),
        opts.amount(totals.tax_total()),
    ]);

    render(builder, &[1, 2, 3])
}

fn format_rate(rate: f64) -> String {
    format!("{}%", (rate * 100.0).round())
}

fn tap_table(rows: &[TapRow], opts: &DisplayOptions) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#", "Code Wilaya", "Wilaya", "Commune", "TAP 2%"]);

    for (i, row) in rows.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            row.region_code.clone(),
            wilaya_name(&row.region_code).to_string(),
            row.municipality.clone(),
            opts.raw(&row.tap_amount),
        ]);
    }

    builder.push_record([
        String::new(),
        String::new(),
        String::new(),
        "MONTANT TAP".to_string(),
        format!("{} DZD", opts.amount(tap_total(rows))),
    ]);

    render(builder, &[4])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeclarationDraft, Period};

    fn opts() -> DisplayOptions {
        DisplayOptions {
            locale: Locale::en,
            date_format: "%Y-%m-%d".to_string(),
        }
    }

    fn encaissement(rows: Vec<(&str, &str)>) -> Declaration {
        DeclarationDraft::new(
            "DR Alger",
            Period::new("03", "2025"),
            DeclarationBody::Encaissement(
                rows.into_iter()
                    .map(|(label, amount)| EncaissementRow {
                        label: label.into(),
                        gross_amount: amount.into(),
                    })
                    .collect(),
            ),
        )
        .into_declaration()
    }

    #[test]
    fn test_list_table() {
        let decl = encaissement(vec![("Ventes", "1190")]);
        let output = format_declaration_list(&[decl.clone()], &opts());

        assert!(output.contains("Encaissement"));
        assert!(output.contains("DR Alger"));
        assert!(output.contains("Mars"));
        assert!(output.contains("1,190.00"));
        assert!(output.contains(decl.id.short()));
        assert!(output.contains("1 declaration(s)"));
    }

    #[test]
    fn test_empty_messages() {
        assert!(format_declaration_list(&[], &opts()).contains("No declarations saved yet"));
        assert!(empty_list_message(true).contains("match"));
    }

    #[test]
    fn test_encaissement_derived_columns() {
        let decl = encaissement(vec![("Ventes", "1190"), ("Divers", "")]);
        let table = format_declaration_table(&decl.body, &opts());

        assert!(table.contains("1,000.00"));
        assert!(table.contains("190.00"));
        assert!(table.contains("TOTAL"));
        assert!(table.contains(PLACEHOLDER));
    }

    #[test]
    fn test_derived_columns_follow_lenient_totals() {
        let decl = encaissement(vec![("Ventes", "1190abc")]);
        let table = format_declaration_table(&decl.body, &opts());

        let row = table
            .lines()
            .find(|line| line.contains("Ventes"))
            .unwrap();
        assert!(row.contains(PLACEHOLDER));
        assert!(row.contains("1,000.00"));
        assert!(row.contains("190.00"));

        let total = table.lines().find(|line| line.contains("TOTAL")).unwrap();
        assert!(total.contains("1,190.00"));
        assert!(total.contains("1,000.00"));
    }

    #[test]
    fn test_undefined_record_display() {
        let json = r#"{"id": "legacy-2", "createdAt": "", "direction": "DR Blida", "mois": "02", "annee": "2024"}"#;
        let decl: Declaration = serde_json::from_str(json).unwrap();

        let list = format_declaration_list(&[decl.clone()], &opts());
        assert!(list.contains("Non défini"));
        assert!(list.contains("DR Blida"));
        assert!(list.contains(PLACEHOLDER));

        let details = format_declaration_details(&decl, &opts());
        assert!(details.contains("(undefined)"));
        assert!(details.contains("No table"));
    }

    #[test]
    fn test_turnover_table() {
        let body = DeclarationBody::TurnoverTax(TurnoverBases {
            base_7_percent: "1000".into(),
            base_global_1_percent: "500".into(),
        });
        let table = format_declaration_table(&body, &opts());

        assert!(table.contains("70.00"));
        assert!(table.contains("5.00"));
        assert!(table.contains("1,500.00"));
        assert!(table.contains("75.00"));
        assert!(table.contains("7%"));
    }

    #[test]
    fn test_tap_table_names_wilaya() {
        let body = DeclarationBody::Tap(vec![TapRow {
            region_code: "31".into(),
            municipality: "Es Sénia".into(),
            tap_amount: "50".into(),
        }]);
        let table = format_declaration_table(&body, &opts());

        assert!(table.contains("Oran"));
        assert!(table.contains("MONTANT TAP"));
        assert!(table.contains("50.00 DZD"));
    }

    #[test]
    fn test_vat_nature_label() {
        let body = DeclarationBody::VatFixedAsset(vec![VatRow {
            counterparty_name: "SARL Beta".into(),
            nature: "bien_amortissable".into(),
            net_amount: "2000".into(),
            deductible_vat: "380".into(),
            ..Default::default()
        }]);
        let table = format_declaration_table(&body, &opts());

        assert!(table.contains("Bien amortissable"));
        assert!(table.contains("2,000.00"));
        assert!(table.contains("380.00"));
    }

    #[test]
    fn test_details_header() {
        let decl = encaissement(vec![("Ventes", "100")]);
        let output = format_declaration_details(&decl, &opts());

        assert!(output.contains(decl.id.as_str()));
        assert!(output.contains("Mars 2025"));
        assert!(output.contains("Encaissement (encaissement)"));
    }
}
