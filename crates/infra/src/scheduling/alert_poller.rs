//! Periodic SLA alert scan
//!
//! Every tick fetches fresh records, evaluates both triage lists against the
//! clock and hands the alerts the session has not acknowledged to the sink.
//! Ticks are independent: a failed fetch is logged and the next tick simply
//! tries again. The poller only reads the session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use asodi_core::{AlertSession, AlertSink, Clock, TriageService};
use asodi_domain::{AlertConfig, AsodiError};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::error::{SchedulerError, SchedulerResult};

/// Type alias for task handle to avoid complexity warnings
type TaskHandle = Arc<Mutex<Option<JoinHandle<()>>>>;

/// Configuration for [`AlertPoller`]
#[derive(Debug, Clone)]
pub struct AlertPollerConfig {
    /// Time between scans
    pub interval: Duration,
    /// Upper bound for one scan (fetch + evaluate + deliver)
    pub tick_timeout: Duration,
    /// How long `stop` waits for the task to finish
    pub join_timeout: Duration,
}

impl Default for AlertPollerConfig {
    fn default() -> Self {
        Self::from(&AlertConfig::default())
    }
}

impl From<&AlertConfig> for AlertPollerConfig {
    fn from(config: &AlertConfig) -> Self {
        let interval = Duration::from_secs(config.poll_interval_secs.max(1));
        Self { interval, tick_timeout: interval, join_timeout: Duration::from_secs(5) }
    }
}

/// Tick counters, shared with the background task
#[derive(Debug, Default)]
pub struct PollerStats {
    ticks: AtomicU64,
    failures: AtomicU64,
    delivered: AtomicU64,
}

impl PollerStats {
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Total alerts handed to the sink.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

/// Cancellable periodic alert scanner
pub struct AlertPoller<C: Clock + 'static> {
    service: Arc<TriageService<C>>,
    session: AlertSession,
    sink: Arc<dyn AlertSink>,
    config: AlertPollerConfig,
    stats: Arc<PollerStats>,
    cancellation_token: CancellationToken,
    task_handle: TaskHandle,
}

impl<C: Clock + 'static> AlertPoller<C> {
    pub fn new(
        service: Arc<TriageService<C>>,
        session: AlertSession,
        sink: Arc<dyn AlertSink>,
        config: AlertPollerConfig,
    ) -> Self {
        Self {
            service,
            session,
            sink,
            config,
            stats: Arc::new(PollerStats::default()),
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
        }
    }

    pub fn stats(&self) -> Arc<PollerStats> {
        Arc::clone(&self.stats)
    }

    /// Start polling
    ///
    /// The first scan runs after one full interval.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::AlreadyRunning`] if a task is active
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if self.is_running().await {
            return Err(SchedulerError::AlreadyRunning);
        }

        // Fresh token so the poller can be restarted after stop
        self.cancellation_token = CancellationToken::new();

        let worker = Tick {
            service: Arc::clone(&self.service),
            session: self.session.clone(),
            sink: Arc::clone(&self.sink),
            stats: Arc::clone(&self.stats),
            tick_timeout: self.config.tick_timeout,
        };
        let interval = self.config.interval;
        let cancel = self.cancellation_token.clone();

        let handle = tokio::spawn(async move {
            Self::poll_loop(worker, interval, cancel).await;
        });
        *self.task_handle.lock().await = Some(handle);

        info!(interval_secs = interval.as_secs_f64(), "Alert poller started");
        Ok(())
    }

    /// Stop polling and wait for the task to finish
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::NotRunning`] if no task is active, or a
    /// timeout/join error if the task does not wind down cleanly
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        let Some(handle) = self.task_handle.lock().await.take() else {
            return Err(SchedulerError::NotRunning);
        };

        self.cancellation_token.cancel();

        match tokio::time::timeout(self.config.join_timeout, handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(error = %e, "Alert poller task failed");
                return Err(SchedulerError::TaskJoinFailed(e.to_string()));
            }
            Err(_) => {
                warn!("Alert poller task did not complete within timeout");
                return Err(SchedulerError::Timeout { seconds: self.config.join_timeout.as_secs() });
            }
        }

        info!("Alert poller stopped");
        Ok(())
    }

    /// A poller is running while it holds a task handle.
    pub async fn is_running(&self) -> bool {
        self.task_handle.lock().await.is_some()
    }

    /// Run one scan right now, outside the schedule.
    pub async fn scan_now(&self) -> Result<usize, AsodiError> {
        Tick {
            service: Arc::clone(&self.service),
            session: self.session.clone(),
            sink: Arc::clone(&self.sink),
            stats: Arc::clone(&self.stats),
            tick_timeout: self.config.tick_timeout,
        }
        .run()
        .await
    }

    async fn poll_loop(worker: Tick<C>, interval: Duration, cancel: CancellationToken) {
        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    debug!("Alert poll loop cancelled");
                    break;
                }
                () = tokio::time::sleep(interval) => {
                    if let Err(err) = worker.run().await {
                        error!(error = %err, "Alert scan failed; retrying next tick");
                    }
                }
            }
        }
    }
}

/// State one scan needs, cloned into the background task
struct Tick<C: Clock + 'static> {
    service: Arc<TriageService<C>>,
    session: AlertSession,
    sink: Arc<dyn AlertSink>,
    stats: Arc<PollerStats>,
    tick_timeout: Duration,
}

impl<C: Clock + 'static> Tick<C> {
    async fn run(&self) -> Result<usize, AsodiError> {
        self.stats.ticks.fetch_add(1, Ordering::Relaxed);

        let outcome = tokio::time::timeout(self.tick_timeout, async {
            let alerts = self.service.scan(&self.session).await?;
            let count = alerts.len();
            if count > 0 {
                self.sink.deliver(alerts).await?;
            }
            Ok::<usize, AsodiError>(count)
        })
        .await
        .unwrap_or_else(|_| {
            Err(SchedulerError::Timeout { seconds: self.tick_timeout.as_secs() }.into())
        });

        match &outcome {
            Ok(count) => {
                self.stats.delivered.fetch_add(*count as u64, Ordering::Relaxed);
                debug!(alerts = count, "Alert scan delivered");
            }
            Err(_) => {
                self.stats.failures.fetch_add(1, Ordering::Relaxed);
            }
        }
        outcome
    }
}

/// Ensure the task is cancelled when the poller is dropped
impl<C: Clock + 'static> Drop for AlertPoller<C> {
    fn drop(&mut self) {
        if !self.cancellation_token.is_cancelled() {
            debug!("AlertPoller dropped; cancelling");
            self.cancellation_token.cancel();
        }
    }
}
