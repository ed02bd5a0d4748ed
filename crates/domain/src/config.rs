//! Configuration structures
//!
//! Loaded by `asodi_infra::config` from the environment or a JSON/TOML file.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALERT_POLL_INTERVAL_SECS, DEFAULT_API_BASE_URL, DEFAULT_API_MAX_ATTEMPTS,
    DEFAULT_API_TIMEOUT_SECS,
};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme and host of the backend, without the `/asodi/v1` prefix.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts per request (initial try + retries).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
        }
    }
}

/// Alert poller settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { poll_interval_secs: DEFAULT_ALERT_POLL_INTERVAL_SECS, enabled: true }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_API_TIMEOUT_SECS
}

fn default_max_attempts() -> usize {
    DEFAULT_API_MAX_ATTEMPTS
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_ALERT_POLL_INTERVAL_SECS
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
