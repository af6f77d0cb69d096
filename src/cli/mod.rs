//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod declaration;
pub mod export;
pub mod reference;

pub use audit::handle_audit_command;
pub use declaration::{handle_declaration_command, DeclarationCommands, FilterArgs};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use reference::{handle_regions_command, handle_wilayas_command};
