//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/trip/config.toml)
//! 3. Environment variables (TRIP_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::filter::FilterType;
use crate::sort::SortType;

/// Environment variable prefix
const ENV_PREFIX: &str = "TRIP";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the trip API (optional)
    #[serde(default)]
    pub server_url: Option<String>,

    /// Value for the `Authorization` header sent by the API client
    #[serde(default)]
    pub authorization: Option<String>,

    /// Ordering applied when the trip list first renders
    #[serde(default)]
    pub default_sort: SortType,

    /// Filter selected when the trip list first renders
    #[serde(default)]
    pub default_filter: FilterType,

    /// Log directives (`info`, `trip_core=debug`, ...)
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: None,
            authorization: None,
            default_sort: SortType::default(),
            default_filter: FilterType::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (TRIP_SERVER_URL, TRIP_AUTHORIZATION, ...)
    /// 2. Config file (~/.config/trip/config.toml or TRIP_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // TRIP_SERVER_URL
        if let Ok(val) = std::env::var(format!("{}_SERVER_URL", ENV_PREFIX)) {
            self.server_url = if val.is_empty() { None } else { Some(val) };
        }

        // TRIP_AUTHORIZATION
        if let Ok(val) = std::env::var(format!("{}_AUTHORIZATION", ENV_PREFIX)) {
            self.authorization = if val.is_empty() { None } else { Some(val) };
        }

        // TRIP_DEFAULT_SORT
        if let Ok(val) = std::env::var(format!("{}_DEFAULT_SORT", ENV_PREFIX)) {
            match val.parse() {
                Ok(sort) => self.default_sort = sort,
                Err(e) => warn!("Ignoring {}_DEFAULT_SORT: {}", ENV_PREFIX, e),
            }
        }

        // TRIP_DEFAULT_FILTER
        if let Ok(val) = std::env::var(format!("{}_DEFAULT_FILTER", ENV_PREFIX)) {
            match val.parse() {
                Ok(filter) => self.default_filter = filter,
                Err(e) => warn!("Ignoring {}_DEFAULT_FILTER: {}", ENV_PREFIX, e),
            }
        }

        // TRIP_LOG
        if let Ok(val) = std::env::var(format!("{}_LOG", ENV_PREFIX)) {
            if !val.is_empty() {
                self.log_filter = val;
            }
        }
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with TRIP_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("trip")
            .join("config.toml")
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}
