//! Display formatting for terminal output
//!
//! Provides utilities for formatting declarations for terminal display:
//! amounts, listings, statement tables and the print layout.

pub mod amount;
pub mod declaration;
pub mod print;
pub mod reference;

pub use amount::{format_amount, format_raw, PLACEHOLDER};
pub use declaration::{
    empty_list_message, format_declaration_details, format_declaration_list,
    format_declaration_table, DisplayOptions,
};
pub use print::render_print_layout;
pub use reference::{format_region_list, format_wilaya_details, format_wilaya_list};
