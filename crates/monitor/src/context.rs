//! Monitor context: wires the REST client into the triage service

use std::sync::Arc;

use asodi_core::ports::AlertSink;
use asodi_core::{AlertSession, SystemClock, TriageService};
use asodi_domain::Config;
use asodi_infra::{AlertPoller, AlertPollerConfig, ApiError, AsodiClient, AsodiClientConfig};

pub struct MonitorContext {
    pub config: Config,
    pub client: Arc<AsodiClient>,
    pub triage: Arc<TriageService<SystemClock>>,
    pub session: AlertSession,
}

impl MonitorContext {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let client = Arc::new(AsodiClient::new(AsodiClientConfig::from(&config.api))?);
        let triage =
            Arc::new(TriageService::new(client.clone(), client.clone(), SystemClock));

        Ok(Self { config, client, triage, session: AlertSession::new() })
    }

    pub fn alert_poller(&self, sink: Arc<dyn AlertSink>) -> AlertPoller<SystemClock> {
        AlertPoller::new(
            Arc::clone(&self.triage),
            self.session.clone(),
            sink,
            AlertPollerConfig::from(&self.config.alerts),
        )
    }
}
