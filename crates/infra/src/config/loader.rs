//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when `ASODI_API_BASE_URL` is set
//! 2. Otherwise the first config file found by [`find_config_path`]
//!
//! ## Environment Variables
//! - `ASODI_API_BASE_URL`: backend scheme and host (required for env loading)
//! - `ASODI_API_TIMEOUT_SECS`: per-request timeout
//! - `ASODI_API_MAX_ATTEMPTS`: attempts per request, retries included
//! - `ASODI_ALERT_POLL_INTERVAL_SECS`: seconds between alert scans
//! - `ASODI_ALERTS_ENABLED`: whether the poller runs (true/false)
//! - `ASODI_LOG_LEVEL`: default filter directive
//! - `ASODI_LOG_JSON`: JSON log lines (true/false)
//!
//! ## File Locations
//! `config.{json,toml}` and `asodi.{json,toml}` in the working directory,
//! its two parents, and next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use asodi_domain::constants::{
    DEFAULT_ALERT_POLL_INTERVAL_SECS, DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS,
};
use asodi_domain::{AlertConfig, ApiConfig, AsodiError, Config, LoggingConfig, Result};
use url::Url;

const CONFIG_FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "asodi.json", "asodi.toml"];

/// Load configuration, environment first, then file.
///
/// # Errors
/// Returns `AsodiError::Config` when neither source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Environment configuration unavailable, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from `ASODI_*` environment variables.
///
/// Only the base URL is required; every other setting falls back to its
/// default.
///
/// # Errors
/// Returns `AsodiError::Config` if `ASODI_API_BASE_URL` is missing or a
/// value fails to parse.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var("ASODI_API_BASE_URL")?;

    let config = Config {
        api: ApiConfig {
            base_url,
            timeout_secs: env_parse("ASODI_API_TIMEOUT_SECS", DEFAULT_API_TIMEOUT_SECS)?,
            max_attempts: env_parse("ASODI_API_MAX_ATTEMPTS", DEFAULT_API_MAX_ATTEMPTS)?,
        },
        alerts: AlertConfig {
            poll_interval_secs: env_parse(
                "ASODI_ALERT_POLL_INTERVAL_SECS",
                DEFAULT_ALERT_POLL_INTERVAL_SECS,
            )?,
            enabled: env_bool("ASODI_ALERTS_ENABLED", true),
        },
        logging: LoggingConfig {
            level: std::env::var("ASODI_LOG_LEVEL")
                .ok()
                .filter(|level| !level.trim().is_empty())
                .unwrap_or_else(|| LoggingConfig::default().level),
            json: env_bool("ASODI_LOG_JSON", false),
        },
    };

    validate(config)
}

/// Load configuration from a JSON or TOML file.
///
/// If `path` is `None`, uses [`find_config_path`].
///
/// # Errors
/// Returns `AsodiError::Config` if the file is missing, unreadable, or
/// invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AsodiError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_path().ok_or_else(|| {
            AsodiError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AsodiError::Config(format!("Failed to read config file: {}", e)))?;

    validate(parse_config(&contents, &config_path)?)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AsodiError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AsodiError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AsodiError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Rejects settings the client cannot run with.
fn validate(config: Config) -> Result<Config> {
    let url = Url::parse(config.api.base_url.trim())
        .map_err(|e| AsodiError::Config(format!("Invalid API base URL: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AsodiError::Config(format!(
            "API base URL must use http or https, got {}",
            url.scheme()
        )));
    }
    if config.api.max_attempts == 0 {
        return Err(AsodiError::Config("api.max_attempts must be at least 1".to_string()));
    }
    if config.alerts.poll_interval_secs == 0 {
        return Err(AsodiError::Config(
            "alerts.poll_interval_secs must be greater than zero".to_string(),
        ));
    }
    Ok(config)
}

/// Returns the first existing config file, if any.
pub fn find_config_path() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
        roots.push(cwd.join("../.."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
            roots.push(exe_dir.join(".."));
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AsodiError::Config(format!("Missing required environment variable: {}", key)))
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AsodiError::Config(format!("Invalid value for {}: {}", key, e))),
        _ => Ok(default),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive).
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
