//! User settings for the cash flow tracker

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::AppPaths;
use crate::error::LedgerError;
use crate::services::{FieldNames, DEFAULT_SAMPLE_SIZE};

/// User settings, stored as `config.json` in the base directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// CSV header names for the four transaction fields
    #[serde(default)]
    pub field_names: FieldNames,

    /// Rows sampled to infer the date layout of an imported file
    #[serde(default = "default_sample_size")]
    pub date_sample_size: usize,

    /// Where exports are written; the base directory's `exports/` if unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// `tracing` filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            field_names: FieldNames::default(),
            date_sample_size: default_sample_size(),
            export_dir: None,
            currency_symbol: default_currency(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &AppPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AppPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The configured export directory, falling back to the default
    pub fn resolve_export_dir(&self, paths: &AppPaths) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| paths.export_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.field_names.date, "date");
        assert_eq!(settings.field_names.value, "value");
        assert_eq!(settings.date_sample_size, 30);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.log_filter, "warn");
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path());

        let mut settings = Settings::default();
        settings.field_names.value = "Amount".into();
        settings.currency_symbol = "€".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.field_names.value, "Amount");
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path());
        std::fs::write(
            paths.settings_file(),
            r#"{"field_names": {"date": "Posted"}, "log_filter": "debug"}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.field_names.date, "Posted");
        assert_eq!(loaded.field_names.description, "description");
        assert_eq!(loaded.log_filter, "debug");
        assert_eq!(loaded.date_sample_size, 30);
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AppPaths::with_base_dir(temp_dir.path());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }

    #[test]
    fn test_resolve_export_dir() {
        let paths = AppPaths::with_base_dir("/tmp/cashflow");
        let mut settings = Settings::default();
        assert_eq!(settings.resolve_export_dir(&paths), paths.export_dir());

        settings.export_dir = Some(PathBuf::from("/srv/reports"));
        assert_eq!(settings.resolve_export_dir(&paths), PathBuf::from("/srv/reports"));
    }
}
