//! ASODI alert monitor
//!
//! Polls the backend for pending and in-process patients and logs every
//! overdue or at-risk patient until interrupted.

mod context;
mod sink;

use anyhow::Context as _;
use asodi_infra::{config, init_logging};
use tracing::{debug, info, warn};

use crate::context::MonitorContext;
use crate::sink::LogAlertSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be applied before the loader reads ASODI_* variables
    let dotenv = dotenvy::dotenv();

    let config = config::load().context("failed to load configuration")?;
    init_logging(&config.logging).context("failed to initialize logging")?;

    match dotenv {
        Ok(path) => info!(path = %path.display(), "Loaded .env"),
        Err(e) => debug!(error = %e, "No .env file loaded"),
    }

    let ctx = MonitorContext::new(config).context("failed to build backend client")?;
    info!(api = %ctx.client.api_root(), "ASODI monitor starting");

    if !ctx.config.alerts.enabled {
        info!("Alert polling disabled by configuration; exiting");
        return Ok(());
    }

    let mut poller = ctx.alert_poller(LogAlertSink::shared());

    if let Err(e) = poller.scan_now().await {
        warn!(error = %e, "Initial alert scan failed");
    }
    poller.start().await.context("failed to start alert poller")?;

    tokio::signal::ctrl_c().await.context("failed to listen for Ctrl-C")?;
    info!("Shutdown requested");

    poller.stop().await.context("alert poller did not stop cleanly")?;
    let stats = poller.stats();
    info!(
        ticks = stats.ticks(),
        failures = stats.failures(),
        delivered = stats.delivered(),
        "ASODI monitor stopped"
    );
    Ok(())
}
