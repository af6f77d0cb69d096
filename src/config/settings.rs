//! User settings for fisca-cli
//!
//! Manages the region service endpoint, the pre-save delay and number
//! formatting preferences.

use std::time::Duration;

use num_format::Locale;
use serde::{Deserialize, Serialize};

use super::paths::FiscaPaths;
use crate::error::FiscaError;
use crate::storage::file_io::write_json_atomic;

/// Environment variable that overrides the stored API token
pub const API_TOKEN_ENV: &str = "FISCA_API_TOKEN";

/// User settings for fisca-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the service exposing `/api/regions`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bearer token sent with region requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Pause before a declaration is stored, in milliseconds
    #[serde(default = "default_save_delay_ms")]
    pub save_delay_ms: u64,

    /// Region request timeout, in seconds
    #[serde(default = "default_region_timeout_secs")]
    pub region_timeout_secs: u64,

    /// Locale name used for digit grouping (e.g. "fr", "en")
    #[serde(default = "default_number_locale")]
    pub number_locale: String,

    /// Date-time format for listings (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:5001".to_string()
}

fn default_save_delay_ms() -> u64 {
    400
}

fn default_region_timeout_secs() -> u64 {
    10
}

fn default_number_locale() -> String {
    "fr".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y %H:%M".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            api_token: None,
            save_delay_ms: default_save_delay_ms(),
            region_timeout_secs: default_region_timeout_secs(),
            number_locale: default_number_locale(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FiscaPaths) -> Result<Self, FiscaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FiscaError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FiscaError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FiscaPaths) -> Result<(), FiscaError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Token for region requests, the environment taking precedence
    pub fn api_token(&self) -> Option<String> {
        std::env::var(API_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.api_token.clone())
    }

    /// Pause applied before a declaration is stored
    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms)
    }

    /// Timeout for the region request
    pub fn region_timeout(&self) -> Duration {
        Duration::from_secs(self.region_timeout_secs)
    }

    /// Number formatting locale, falling back to French on unknown names
    pub fn locale(&self) -> Locale {
        Locale::from_name(self.number_locale.as_str()).unwrap_or(Locale::fr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:5001");
        assert_eq!(settings.save_delay(), Duration::from_millis(400));
        assert_eq!(settings.number_locale, "fr");
        assert!(settings.api_token.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FiscaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.api_base_url = "https://fisca.example".into();
        settings.save_delay_ms = 0;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.api_base_url, "https://fisca.example");
        assert_eq!(loaded.save_delay_ms, 0);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"save_delay_ms": 50}"#).unwrap();
        assert_eq!(settings.save_delay_ms, 50);
        assert_eq!(settings.region_timeout_secs, 10);
        assert_eq!(settings.date_format, "%d/%m/%Y %H:%M");
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let settings = Settings {
            number_locale: "not-a-locale".into(),
            ..Settings::default()
        };
        assert_eq!(settings.locale(), Locale::fr);

        let settings = Settings {
            number_locale: "en".into(),
            ..Settings::default()
        };
        assert_eq!(settings.locale(), Locale::en);
    }
}
