//! Audit logging for fisca-cli
//!
//! Every saved and deleted declaration is recorded, with a snapshot of the
//! stored record, in an append-only audit log.
//!
//! - `AuditEntry`: one operation on one declaration.
//! - `AuditLogger`: appends entries to the log file as line-delimited JSON
//!   (JSONL) and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
