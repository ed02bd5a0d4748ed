//! Port interfaces for triage data and alert delivery
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use asodi_domain::{Agreement, Alert, PatientRecord, Result};
use async_trait::async_trait;

/// Source of patient records
#[async_trait]
pub trait PatientSource: Send + Sync {
    /// Fetch every patient record
    async fn list_patients(&self) -> Result<Vec<PatientRecord>>;
}

/// Source of agreements
#[async_trait]
pub trait AgreementSource: Send + Sync {
    /// Fetch every agreement
    async fn list_agreements(&self) -> Result<Vec<Agreement>>;
}

/// Destination for alerts raised by a scan
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver a batch of new alerts, most urgent first
    async fn deliver(&self, alerts: Vec<Alert>) -> Result<()>;
}
