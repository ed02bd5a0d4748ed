//! Shared helpers for infra integration tests
//!
//! In-memory ports for driving the alert poller, record fixtures, and a
//! polling wait for background effects.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use asodi_core::ports::{AgreementSource, AlertSink, PatientSource};
use asodi_domain::{Agreement, Alert, AsodiError, PatientRecord, PatientStatus, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

/// Frozen "now" shared by the poller tests: 2024-01-10T12:00:00Z.
pub fn scenario_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
}

pub fn pending(id: i64, intake: &str) -> PatientRecord {
    PatientRecord::new(id, format!("{id}.111.111-1"), "FONASA", PatientStatus::Pending, Some(intake.into()))
        .with_name(format!("Paciente{id}"), "Prueba")
}

pub fn in_process(id: i64, intake: &str) -> PatientRecord {
    PatientRecord::new(id, format!("{id}.111.111-1"), "FONASA", PatientStatus::InProcess, Some(intake.into()))
        .with_name(format!("Paciente{id}"), "Prueba")
}

/// 4 hour call window, 10 day operate window alerting at 3 days.
pub fn fonasa() -> Agreement {
    Agreement::hourly("FONASA", 4.0).with_operate_window(10, Some(3))
}

/// Patient source whose contents and availability can change mid-test.
#[derive(Default, Clone)]
pub struct MockPatientSource {
    patients: Arc<Mutex<Vec<PatientRecord>>>,
    fail: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MockPatientSource {
    pub fn new(patients: Vec<PatientRecord>) -> Self {
        Self { patients: Arc::new(Mutex::new(patients)), ..Self::default() }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PatientSource for MockPatientSource {
    async fn list_patients(&self) -> Result<Vec<PatientRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AsodiError::Network("backend unreachable".into()));
        }
        Ok(self.patients.lock().unwrap().clone())
    }
}

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
    async fn list_agreements(&self) -> Result<Vec<Agreement>> {
        Ok(self.agreements.as_ref().clone())
    }
}

/// Sink that records every delivered batch.
#[derive(Default, Clone)]
pub struct RecordingAlertSink {
    batches: Arc<Mutex<Vec<Vec<Alert>>>>,
}

impl RecordingAlertSink {
    pub fn batches(&self) -> Vec<Vec<Alert>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }
}

#[async_trait]
impl AlertSink for RecordingAlertSink {
    async fn deliver(&self, alerts: Vec<Alert>) -> Result<()> {
        self.batches.lock().unwrap().push(alerts);
        Ok(())
    }
}

/// Polls `condition` every few milliseconds until it holds or `timeout`
/// elapses. Returns whether it held.
pub async fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
