//! Configuration module for fisca-cli
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FiscaPaths;
pub use settings::Settings;
