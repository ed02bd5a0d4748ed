//! Mock port implementations for testing
//!
//! In-memory mocks for the core ports, enabling deterministic tests without
//! a backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use asodi_core::ports::{AgreementSource, AlertSink, PatientSource};
use asodi_domain::{Agreement, Alert, AsodiError, PatientRecord, Result as DomainResult};
use async_trait::async_trait;
use parking_lot::Mutex;

/// In-memory mock for `PatientSource`.
///
/// Records can be replaced between calls; a failure flag makes the next
/// fetch return a network error.
#[derive(Default, Clone)]
pub struct MockPatientSource {
    patients: Arc<Mutex<Vec<PatientRecord>>>,
    fail: Arc<Mutex<bool>>,
    calls: Arc<AtomicUsize>,
}

impl MockPatientSource {
    pub fn new(patients: Vec<PatientRecord>) -> Self {
        Self { patients: Arc::new(Mutex::new(patients)), ..Self::default() }
    }

    pub fn replace(&self, patients: Vec<PatientRecord>) {
        *self.patients.lock() = patients;
    }

    pub fn set_should_fail(&self, fail: bool) {
        *self.fail.lock() = fail;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PatientSource for MockPatientSource {
    async fn list_patients(&self) -> DomainResult<Vec<PatientRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail.lock() {
            return Err(AsodiError::Network("connection refused".into()));
        }
        Ok(self.patients.lock().clone())
    }
}

/// In-memory mock for `AgreementSource`.
#[derive(Default, Clone)]
pub struct MockAgreementSource {
    agreements: Arc<Vec<Agreement>>,
}

impl MockAgreementSource {
    pub fn new(agreements: Vec<Agreement>) -> Self {
        Self { agreements: Arc::new(agreements) }
    }
}

#[async_trait]
impl AgreementSource for MockAgreementSource {
    async fn list_agreements(&self) -> DomainResult<Vec<Agreement>> {
        Ok(self.agreements.as_ref().clone())
    }
}

/// Collecting mock for `AlertSink`.
#[derive(Default, Clone)]
pub struct RecordingAlertSink {
    batches: Arc<Mutex<Vec<Vec<Alert>>>>,
}

impl RecordingAlertSink {
    pub fn batches(&self) -> Vec<Vec<Alert>> {
        self.batches.lock().clone()
    }
}

#[async_trait]
impl AlertSink for RecordingAlertSink {
    async fn deliver(&self, alerts: Vec<Alert>) -> DomainResult<()> {
        self.batches.lock().push(alerts);
        Ok(())
    }
}
