//! Configuration System
//!
//! Layered configuration for the engine, the list store and logging.
//! Sources, lowest to highest priority: built-in defaults, the global
//! config file, workspace config files, then `ENTRYLIST__*` environment
//! variables.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryListConfig {
    /// Reconciliation loop settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// List store settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reconciliation loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Re-scan interval used when a target does not declare its own
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Intervals below this disable periodic re-scanning
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

pub(crate) fn default_interval_ms() -> u64 {
    1000
}

pub(crate) fn default_min_interval_ms() -> u64 {
    100
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl EngineConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_interval_ms == 0 {
            return Err("min_interval_ms must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// List store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory of the sled database holding lists and remembered users
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

pub(crate) fn default_store_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "entrylist")
        .map(|dirs| dirs.data_dir().join("store"))
        .unwrap_or_else(|| PathBuf::from(".entrylist/store"))
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.store_path.as_os_str().is_empty() {
            return Err("Store path cannot be empty".to_string());
        }
        Ok(())
    }

    /// Resolve a relative store path against `base`
    pub fn resolve_store_path(&self, base: &Path) -> PathBuf {
        if self.store_path.is_absolute() {
            self.store_path.clone()
        } else {
            base.join(&self.store_path)
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Engine(String),
    Storage(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Engine(msg) => write!(f, "Engine: {}", msg),
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl EntryListConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.engine.validate() {
            errors.push(ValidationError::Engine(e));
        }
        if let Err(e) = self.storage.validate() {
            errors.push(ValidationError::Storage(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
