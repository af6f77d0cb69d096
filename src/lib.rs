//! fisca-cli - Terminal-based fiscal declaration entry and history
//!
//! This library provides the core functionality for recording monthly
//! fiscal declarations filed by regional directions: cash receipts, VAT
//! statements, stamp duty, turnover tax and TAP. Declarations are kept in
//! a single JSON collection, listed and filtered, printed as a statement
//! page and exported.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Declarations, category tables, amounts and reference data
//! - `tax`: Derived amounts and statement totals
//! - `storage`: Keyed JSON storage and the declaration repository
//! - `services`: Validation, filtering, lookup and CSV row import
//! - `regions`: Region list fetch from the organisation's API
//! - `audit`: Audit logging system
//! - `display`: Terminal tables and the print layout
//! - `export`: JSON, CSV and YAML export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fisca::config::{paths::FiscaPaths, settings::Settings};
//!
//! let paths = FiscaPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod regions;
pub mod services;
pub mod storage;
pub mod tax;

pub use error::FiscaError;
