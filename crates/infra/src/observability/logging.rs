use tracing_subscriber::{fmt, EnvFilter};

use asodi_domain::{AsodiError, LoggingConfig, Result};

/// Builds the event filter: `RUST_LOG` when set, otherwise the configured
/// level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(config.level.trim())
        .map_err(|e| AsodiError::Config(format!("Invalid log level '{}': {}", config.level, e)))
}

/// Installs the global subscriber.
///
/// Returns `false` when a subscriber was already installed, so repeated
/// calls are harmless.
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    let filter = build_filter(config)?;
    let builder = fmt().with_env_filter(filter).with_target(true);

    let installed = if config.json {
        builder.json().with_current_span(false).try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };
    Ok(installed)
}
