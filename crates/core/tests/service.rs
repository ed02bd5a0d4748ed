//! `TriageService` over mock sources

mod support;

use std::sync::Arc;

use asodi_core::ports::AlertSink;
use asodi_core::{AlertSession, FixedClock, TriageService};
use asodi_domain::{AlertKind, AsodiError};
use chrono::Duration;
use support::fixtures::{fonasa, in_process, pending, scenario_now};
use support::repositories::{MockAgreementSource, MockPatientSource, RecordingAlertSink};

fn service(patients: &MockPatientSource, clock: FixedClock) -> TriageService<FixedClock> {
    TriageService::new(
        Arc::new(patients.clone()),
        Arc::new(MockAgreementSource::new(vec![fonasa()])),
        clock,
    )
}

#[tokio::test]
async fn triage_lists_use_the_injected_clock() {
    let patients = MockPatientSource::new(vec![
        pending(1, "FONASA", "2024-01-10T10:00:00Z"),
        in_process(2, "FONASA", "2024-01-05T12:00:00Z"),
    ]);
    let clock = FixedClock::new(scenario_now());
    let service = service(&patients, clock.clone());

    let pending_list = service.pending_triage().await.unwrap();
    assert_eq!(pending_list[0].display(), "2 horas y 0 minutos");

    clock.advance(Duration::hours(3));
    let pending_list = service.pending_triage().await.unwrap();
    assert_eq!(pending_list[0].display(), "0 horas");

    let in_process_list = service.in_process_triage().await.unwrap();
    assert_eq!(in_process_list.len(), 1);
    assert_eq!(in_process_list[0].patient.id, 2);
}

#[tokio::test]
async fn scan_skips_acknowledged_and_feeds_sink() {
    let patients = MockPatientSource::new(vec![
        pending(1, "FONASA", "2024-01-10T10:00:00Z"),
        pending(2, "FONASA", "2024-01-09T10:00:00Z"),
        in_process(3, "FONASA", "2024-01-08T12:00:00Z"),
    ]);
    let service = service(&patients, FixedClock::new(scenario_now()));
    let session = AlertSession::new();
    let sink = RecordingAlertSink::default();

    let alerts = service.scan(&session).await.unwrap();
    assert_eq!(alerts.iter().map(|a| a.patient_id).collect::<Vec<_>>(), vec![2, 1]);
    assert!(alerts.iter().all(|a| a.kind == AlertKind::CallDeadline));

    session.acknowledge(2);
    let alerts = service.scan(&session).await.unwrap();
    sink.deliver(alerts).await.unwrap();

    let batches = sink.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[0][0].patient_id, 1);
}

#[tokio::test]
async fn source_errors_propagate() {
    let patients = MockPatientSource::new(vec![pending(1, "FONASA", "2024-01-10T10:00:00Z")]);
    patients.set_should_fail(true);
    let service = service(&patients, FixedClock::new(scenario_now()));

    let err = service.pending_triage().await.unwrap_err();
    assert!(matches!(err, AsodiError::Network(_)));
    assert_eq!(patients.calls(), 1);

    patients.set_should_fail(false);
    assert_eq!(service.pending_triage().await.unwrap().len(), 1);
}
