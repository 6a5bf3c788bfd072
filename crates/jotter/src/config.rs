//! Configuration management for jotter.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::checkout::{find_plan, DEFAULT_PLAN_ID};
use crate::error::{Error, Result};
use crate::notebook::DEFAULT_NOTES_KEY;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "jotter";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "notes.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `JOTTER_`)
/// 2. TOML config file at `~/.config/jotter/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Checkout configuration.
    pub checkout: CheckoutConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/jotter/notes.db`
    pub database_path: Option<PathBuf>,
    /// Key the note collection is stored under.
    pub notes_key: String,
}

/// Checkout-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Plan preselected on a fresh checkout.
    pub default_plan: String,
    /// Simulated payment latency in milliseconds.
    pub processing_delay_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            notes_key: DEFAULT_NOTES_KEY.to_string(),
        }
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            default_plan: DEFAULT_PLAN_ID.to_string(),
            processing_delay_ms: 2000,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Sources are merged in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `JOTTER_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("JOTTER_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.notes_key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "notes_key must not be empty".to_string(),
            });
        }

        if find_plan(&self.checkout.default_plan).is_none() {
            return Err(Error::ConfigValidation {
                message: format!("unknown default_plan: {}", self.checkout.default_plan),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the simulated payment latency as a Duration.
    #[must_use]
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.checkout.processing_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.storage.notes_key, "notes");
        assert_eq!(config.checkout.default_plan, "pro");
        assert_eq!(config.checkout.processing_delay_ms, 2000);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_notes_key() {
        let mut config = Config::default();
        config.storage.notes_key = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("notes_key"));
    }

    #[test]
    fn test_validate_unknown_plan() {
        let mut config = Config::default();
        config.checkout.default_plan = "platinum".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("platinum"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("notes.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_processing_delay() {
        let config = Config::default();
        assert_eq!(config.processing_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("jotter"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\nnotes_key = \"drafts\"\n\n[checkout]\ndefault_plan = \"basic\"\nprocessing_delay_ms = 10\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.storage.notes_key, "drafts");
        assert_eq!(config.checkout.default_plan, "basic");
        assert_eq!(config.processing_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_load_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[checkout]\nprocessing_delay_ms = 10\n").unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.checkout.processing_delay_ms, 10);
        assert_eq!(config.checkout.default_plan, "pro");
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[checkout]\ndefault_plan = \"gold\"\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_storage_config_deserialize() {
        let json = r#"{"notes_key": "archive"}"#;
        let storage: StorageConfig = serde_json::from_str(json).unwrap();
        assert_eq!(storage.notes_key, "archive");
        assert!(storage.database_path.is_none());
    }

    #[test]
    fn test_checkout_config_serialize() {
        let json = serde_json::to_string(&CheckoutConfig::default()).unwrap();
        assert!(json.contains("processing_delay_ms"));
    }
}
