//! Configuration for the task core and its storage.
//!
//! Settings are layered with the following priority (highest first):
//! 1. Environment variables (`TASKFLOW_DATABASE_URL`)
//! 2. TOML config file
//! 3. Compiled defaults

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding [`StorageConfig::database_url`].
pub const DATABASE_URL_ENV: &str = "TASKFLOW_DATABASE_URL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskflowConfig {
    /// `[storage]` section.
    pub storage: StorageConfig,
    /// `[service]` section.
    pub service: ServiceConfig,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_idle: u32,
    /// Time allowed to acquire a connection, in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/taskflow".to_owned(),
            max_connections: 10,
            min_idle: 2,
            connect_timeout_ms: 10_000,
        }
    }
}

impl StorageConfig {
    /// Returns the connection acquisition timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Task service settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Upper bound for each store call, in milliseconds.
    pub operation_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            operation_timeout_ms: 10_000,
        }
    }
}

impl ServiceConfig {
    /// Returns the per-call store timeout.
    #[must_use]
    pub const fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }
}

impl TaskflowConfig {
    /// Loads a config file and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseToml`] for malformed input.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies environment overrides read through `lookup`.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.storage.database_url = url;
        }
        self
    }
}
