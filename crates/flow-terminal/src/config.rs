//! Configuration for the flow terminal.
//!
//! Values come from (lowest to highest precedence):
//! - built-in defaults,
//! - an optional TOML file (`--config flow.toml`),
//! - command-line flags (applied in `main`).
//!
//! Example file:
//!
//! ```toml
//! base_url = "http://10.0.0.5:8080"
//! page_size = 100
//! poll_interval_ms = 2000
//! settings_path = "/home/me/.flow-settings.json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use flow_core::SyncConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server base URL; the query path is appended to it.
    pub base_url: String,

    /// Rows per page for reloads and load-more.
    pub page_size: usize,

    /// Incremental poll period.
    pub poll_interval_ms: u64,

    /// Minimum spacing between two load-more requests.
    pub load_more_debounce_ms: u64,

    /// HTTP timeout; in-flight requests older than this are expired.
    pub request_timeout_ms: u64,

    /// Key-value settings file (saved filters, timezone).
    pub settings_path: PathBuf,

    /// Write tracing output here. Logging is off when unset and
    /// `--debug` is not given.
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            page_size: flow_core::DEFAULT_PAGE_SIZE,
            poll_interval_ms: 2_000,
            load_more_debounce_ms: 500,
            request_timeout_ms: 10_000,
            settings_path: PathBuf::from("flow-settings.json"),
            log_file: None,
        }
    }
}

impl ClientConfig {
    /// Load from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be > 0".into()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be > 0".into()));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid("request_timeout_ms must be > 0".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            page_size: self.page_size,
            load_more_debounce: Duration::from_millis(self.load_more_debounce_ms),
            request_timeout: self.request_timeout(),
        }
    }
}
