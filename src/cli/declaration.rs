//! Declaration CLI commands
//!
//! Implements entry, listing, viewing, printing and deletion of
//! declarations.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use tracing::info;

use crate::config::Settings;
use crate::display::{
    empty_list_message, format_amount, format_declaration_details, format_declaration_list,
    render_print_layout, DisplayOptions,
};
use crate::error::{FiscaError, FiscaResult};
use crate::models::region::find_region;
use crate::models::{DeclarationBody, DeclarationCategory, DeclarationDraft, Period};
use crate::regions::{RegionClient, RegionLoader};
use crate::services::{read_rows_from_path, DeclarationFilter, DeclarationService};
use crate::storage::{write_text_atomic, Storage};

/// Filters shared by listing and export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Month code (1-12)
    #[arg(short, long)]
    pub month: Option<String>,
    /// Year
    #[arg(short, long)]
    pub year: Option<String>,
    /// Direction (case-insensitive substring)
    #[arg(short, long)]
    pub direction: Option<String>,
    /// Category (encaissement, tva_immo, tva_biens, stamp_duty, turnover_tax, tap)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Minimum total (inclusive)
    #[arg(long)]
    pub min: Option<f64>,
    /// Maximum total (inclusive)
    #[arg(long)]
    pub max: Option<f64>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> FiscaResult<DeclarationFilter> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(c) if c.eq_ignore_ascii_case("all") => None,
            Some(c) => Some(
                c.parse::<DeclarationCategory>()
                    .map_err(|e| FiscaError::Validation(e.to_string()))?,
            ),
        };

        for (flag, bound) in [("--min", self.min), ("--max", self.max)] {
            if let Some(value) = bound.filter(|v| !v.is_finite()) {
                return Err(FiscaError::Validation(format!(
                    "{} must be a finite number, got {}",
                    flag, value
                )));
            }
        }

        Ok(DeclarationFilter::new()
            .month(self.month.as_deref().unwrap_or(""))
            .year(self.year.as_deref().unwrap_or(""))
            .direction(self.direction.as_deref().unwrap_or(""))
            .category(category)
            .amount_range(self.min, self.max))
    }
}

/// Declaration subcommands
#[derive(Subcommand, Debug)]
pub enum DeclarationCommands {
    /// Enter and save a new declaration
    Declare {
        /// Category (encaissement, tva_immo, tva_biens, stamp_duty, turnover_tax, tap)
        category: String,
        /// Regional direction filing the declaration
        #[arg(short, long, default_value = "")]
        direction: String,
        /// Month code (defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<String>,
        /// Table row as ';'-separated cells, in column order (repeatable)
        #[arg(short, long = "row", value_name = "CELLS")]
        rows: Vec<String>,
        /// Read table rows from a CSV file
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
        /// Turnover subject to the 7% rate
        #[arg(long)]
        base7: Option<String>,
        /// Global turnover subject to the 1% rate
        #[arg(long)]
        base1: Option<String>,
        /// Do not check the direction against the region list
        #[arg(long)]
        offline: bool,
    },
    /// List saved declarations, most recent first
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Show at most this many declarations
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show a declaration with its statement table
    Show {
        /// Declaration ID or ID prefix
        id: String,
    },
    /// Render the printable statement page
    Print {
        /// Declaration ID or ID prefix
        id: String,
        /// Write the page to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete a declaration
    Delete {
        /// Declaration ID or ID prefix
        id: String,
        /// Delete without asking for confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Split a `--row` value into cells
fn parse_row_arg(row: &str) -> Vec<String> {
    row.split(';').map(|cell| cell.trim().to_string()).collect()
}

/// Collect the table cells given on the command line
fn collect_rows(
    category: DeclarationCategory,
    rows: &[String],
    csv: Option<&PathBuf>,
    base7: Option<String>,
    base1: Option<String>,
) -> FiscaResult<Vec<Vec<String>>> {
    let mut table: Vec<Vec<String>> = rows.iter().map(|r| parse_row_arg(r)).collect();

    if let Some(path) = csv {
        table.extend(read_rows_from_path(category, path)?);
    }

    if base7.is_some() || base1.is_some() {
        if category != DeclarationCategory::TurnoverTax {
            return Err(FiscaError::Validation(
                "--base7 and --base1 only apply to turnover_tax declarations".into(),
            ));
        }
        table.push(vec![base7.unwrap_or_default(), base1.unwrap_or_default()]);
    }

    Ok(table)
}

/// Handle a declaration command
pub async fn handle_declaration_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DeclarationCommands,
) -> FiscaResult<()> {
    let service = DeclarationService::new(storage).with_save_delay(settings.save_delay());
    let opts = DisplayOptions::from_settings(settings);

    match cmd {
        DeclarationCommands::Declare {
            category,
            direction,
            month,
            year,
            rows,
            csv,
            base7,
            base1,
            offline,
        } => {
            let category: DeclarationCategory = category
                .parse()
                .map_err(|e: crate::models::ParseCategoryError| {
                    FiscaError::Validation(e.to_string())
                })?;

            // Fetch regions while the rest of the input is prepared
            let loader = if offline {
                None
            } else {
                Some(RegionLoader::spawn(RegionClient::from_settings(settings)?))
            };

            let current = Period::current();
            let period = Period::new(
                month.unwrap_or(current.month),
                year.unwrap_or(current.year),
            );
            let table = collect_rows(category, &rows, csv.as_ref(), base7, base1)?;
            let body = DeclarationBody::from_table(category, table)?;

            let mut draft = DeclarationDraft::new(direction, period, body);
            draft.validate()?;

            if let Some(loader) = loader {
                let regions = loader.regions().await;
                if regions.is_empty() {
                    info!("no region list, direction kept as entered");
                } else {
                    match find_region(&regions, &draft.direction) {
                        Some(region) => draft.direction = region.name.clone(),
                        None => {
                            return Err(FiscaError::Validation(format!(
                                "Unknown direction '{}'. Run 'fisca regions' to list the available directions",
                                draft.direction.trim()
                            )));
                        }
                    }
                }
            }

            let saved = service.submit(draft).await?;

            println!("Saved declaration: {}", saved.category().label());
            println!("  Direction: {}", saved.direction);
            println!("  Period:    {}", saved.period);
            println!("  Rows:      {}", saved.body.row_count());
            println!(
                "  Total:     {}",
                format_amount(saved.representative_total(), &opts.locale)
            );
            println!("  ID:        {}", saved.id);
        }

        DeclarationCommands::List { filter, limit } => {
            let filter = filter.to_filter()?;
            let mut declarations = service.list(&filter)?;

            if declarations.is_empty() {
                println!("{}", empty_list_message(filter.is_active()));
                return Ok(());
            }
            if let Some(limit) = limit {
                declarations.truncate(limit);
            }
            print!("{}", format_declaration_list(&declarations, &opts));
        }

        DeclarationCommands::Show { id } => {
            let declaration = service.find(&id)?;
            print!("{}", format_declaration_details(&declaration, &opts));
        }

        DeclarationCommands::Print { id, output } => {
            let declaration = service.find(&id)?;
            let page = render_print_layout(&declaration, &opts);

            match output {
                Some(path) => {
                    write_text_atomic(&path, &page)?;
                    println!("Print layout written to: {}", path.display());
                }
                None => print!("{}", page),
            }
        }

        DeclarationCommands::Delete { id, force } => {
            let declaration = service.find(&id)?;

            if !force {
                println!(
                    "About to delete {} for {} ({}), ID {}",
                    declaration.category().label(),
                    declaration.direction,
                    declaration.period,
                    declaration.id
                );
                println!("To proceed, run again with --force flag:");
                println!("  fisca delete {} --force", declaration.id.short());
                return Ok(());
            }

            let deleted = service.delete(declaration.id.as_str())?;
            println!("Deleted declaration: {}", deleted.id);
        }
    }

    Ok(())
}
