//! Configuration for afdview.
//!
//! Settings live in `~/.afdview/config.json`. Every field has a default, so
//! a missing file, a partial file or an unreadable file all yield a usable
//! configuration. Command-line flags are applied on top by the caller.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::StorageError;
use crate::linkify::{LinkOptions, DEFAULT_EXCLUDED_DOMAIN};

/// The data directory name under the home directory.
const DATA_DIR: &str = ".afdview";

/// The config file name.
const CONFIG_FILE: &str = "config.json";

/// Default NWS API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.weather.gov";

/// Path of the data directory (`~/.afdview`).
pub fn data_dir() -> Result<PathBuf, StorageError> {
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR))
        .ok_or(StorageError::NoHomeDirectory)
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the NWS API
    pub api_base_url: String,
    /// User-Agent sent with API requests
    pub user_agent: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Links whose host contains this substring are not linkified
    pub excluded_link_domain: Option<String>,
    /// Emit OSC 8 hyperlinks
    pub hyperlinks: bool,
    /// Office shown when none is given on the command line, e.g. `KPQR`
    pub default_office: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: format!("afdview/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 20,
            excluded_link_domain: Some(DEFAULT_EXCLUDED_DOMAIN.to_string()),
            hyperlinks: true,
            default_office: None,
        }
    }
}

impl Config {
    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Link options derived from this configuration.
    pub fn link_options(&self) -> LinkOptions {
        LinkOptions {
            excluded_domain: self.excluded_link_domain.clone(),
            hyperlinks: self.hyperlinks,
            ..LinkOptions::default()
        }
    }
}

/// Loads the configuration file.
#[derive(Debug)]
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a manager for the default config path.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let config_path = data_dir().ok()?.join(CONFIG_FILE);
        Some(Self { config_path })
    }

    /// Create a manager for an explicit path.
    pub fn at(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the configuration.
    ///
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(&self) -> Config {
        if !self.config_path.exists() {
            return Config::default();
        }

        let contents = match fs::read_to_string(&self.config_path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!(path = %self.config_path.display(), error = %err, "failed to read config");
                return Config::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %self.config_path.display(), error = %err, "invalid config, using defaults");
                Config::default()
            }
        }
    }
}
