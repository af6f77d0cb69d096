use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fisca::cli::{
    handle_audit_command, handle_declaration_command, handle_export_command,
    handle_regions_command, handle_wilayas_command, DeclarationCommands, ExportArgs,
};
use fisca::config::{paths::FiscaPaths, settings::Settings};
use fisca::storage::Storage;

#[derive(Parser)]
#[command(
    name = "fisca",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based fiscal declaration entry and history",
    long_about = "fisca records monthly fiscal declarations (cash receipts, VAT \
                  statements, stamp duty, turnover tax and TAP) per regional \
                  direction, and lists, prints and exports the saved history."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Declaration(DeclarationCommands),

    /// Export declarations to JSON, CSV or YAML
    Export(ExportArgs),

    /// List the regional directions from the regions service
    Regions,

    /// List wilayas, or the communes of one wilaya
    Wilayas {
        /// Two-digit wilaya code
        code: Option<String>,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory and settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FiscaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Declaration(cmd)) => {
            handle_declaration_command(&storage, &settings, cmd).await?;
        }
        Some(Commands::Export(args)) => handle_export_command(&storage, args)?,
        Some(Commands::Regions) => handle_regions_command(&settings).await?,
        Some(Commands::Wilayas { code }) => handle_wilayas_command(code)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing fisca-cli at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Run 'fisca declare --help' to enter a declaration.");
        }
        Some(Commands::Config) => {
            println!("fisca-cli Configuration");
            println!("=======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!("Exports directory: {}", paths.exports_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Audit log:         {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  API base URL:    {}", settings.api_base_url);
            println!(
                "  API token:       {}",
                if settings.api_token().is_some() {
                    "set"
                } else {
                    "not set"
                }
            );
            println!("  Save delay:      {} ms", settings.save_delay_ms);
            println!("  Region timeout:  {} s", settings.region_timeout_secs);
            println!("  Number locale:   {}", settings.number_locale);
            println!("  Date format:     {}", settings.date_format);
            if !paths.is_initialized() {
                println!();
                println!("Settings file not written yet. Run 'fisca init' to create it.");
            }
        }
        None => {
            println!("fisca - Terminal-based fiscal declarations");
            println!();
            println!("Run 'fisca --help' for usage information.");
        }
    }

    Ok(())
}
