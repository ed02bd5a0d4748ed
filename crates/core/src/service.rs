//! Triage service - fetches records and agreements and evaluates them

use std::sync::Arc;

use asodi_domain::{Agreement, Alert, PatientRecord, Result, TriageEntry};
use tracing::{debug, instrument};

use crate::alerts::{scan_alerts, AlertSession};
use crate::clock::Clock;
use crate::ports::{AgreementSource, PatientSource};
use crate::triage::{triage_in_process, triage_pending};

/// Triage lists and alert scan over injected sources and clock
pub struct TriageService<C: Clock> {
    patients: Arc<dyn PatientSource>,
    agreements: Arc<dyn AgreementSource>,
    clock: C,
}

impl<C: Clock> TriageService<C> {
    pub fn new(
        patients: Arc<dyn PatientSource>,
        agreements: Arc<dyn AgreementSource>,
        clock: C,
    ) -> Self {
        Self { patients, agreements, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Pending patients ordered by time left to the first call.
    #[instrument(skip(self))]
    pub async fn pending_triage(&self) -> Result<Vec<TriageEntry>> {
        let (patients, agreements) = self.fetch().await?;
        Ok(triage_pending(&patients, &agreements, self.clock.now()))
    }

    /// In-process patients ordered by time left to the operation.
    #[instrument(skip(self))]
    pub async fn in_process_triage(&self) -> Result<Vec<TriageEntry>> {
        let (patients, agreements) = self.fetch().await?;
        Ok(triage_in_process(&patients, &agreements, self.clock.now()))
    }

    /// Alerts not yet acknowledged in `session`.
    ///
    /// Both lists are evaluated against the same instant.
    #[instrument(skip(self, session))]
    pub async fn scan(&self, session: &AlertSession) -> Result<Vec<Alert>> {
        let (patients, agreements) = self.fetch().await?;
        let now = self.clock.now();
        let pending = triage_pending(&patients, &agreements, now);
        let in_process = triage_in_process(&patients, &agreements, now);

        let alerts = scan_alerts(&pending, &in_process, session);
        debug!(
            pending = pending.len(),
            in_process = in_process.len(),
            alerts = alerts.len(),
            "Alert scan complete"
        );
        Ok(alerts)
    }

    async fn fetch(&self) -> Result<(Vec<PatientRecord>, Vec<Agreement>)> {
        let patients = self.patients.list_patients().await?;
        let agreements = self.agreements.list_agreements().await?;
        Ok((patients, agreements))
    }
}
