//! Service layer for fisca-cli
//!
//! The service layer provides business logic on top of the storage layer:
//! validation at save time, filtering, lookups and CSV row import.

pub mod declaration;
pub mod filter;
pub mod import;

pub use declaration::{DeclarationService, DEFAULT_SAVE_DELAY};
pub use filter::{sort_most_recent_first, DeclarationFilter};
pub use import::{read_rows, read_rows_from_path};
