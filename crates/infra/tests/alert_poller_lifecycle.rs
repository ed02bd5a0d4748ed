//! Alert poller lifecycle and delivery against in-memory ports

mod support;

use std::sync::Arc;
use std::time::Duration;

use asodi_core::ports::AlertSink;
use asodi_core::{AlertSession, FixedClock, TriageService};
use asodi_domain::{Alert, AlertKind, AsodiError, RiskTier};
use asodi_infra::{AlertPoller, AlertPollerConfig, SchedulerError};
use async_trait::async_trait;
use support::{
    fonasa, in_process, pending, scenario_now, wait_until, MockAgreementSource,
    MockPatientSource, RecordingAlertSink,
};

const WAIT: Duration = Duration::from_secs(2);

fn fast_config() -> AlertPollerConfig {
    AlertPollerConfig {
        interval: Duration::from_millis(20),
        tick_timeout: Duration::from_secs(1),
        join_timeout: Duration::from_secs(1),
    }
}

fn service(patients: &MockPatientSource) -> Arc<TriageService<FixedClock>> {
    Arc::new(TriageService::new(
        Arc::new(patients.clone()),
        Arc::new(MockAgreementSource::new(vec![fonasa()])),
        FixedClock::new(scenario_now()),
    ))
}

fn ward() -> MockPatientSource {
    MockPatientSource::new(vec![
        pending(1, "2024-01-10T10:00:00Z"),
        pending(2, "2024-01-09T10:00:00Z"),
        in_process(3, "2024-01-09T12:00:00Z"),
    ])
}

#[tokio::test]
async fn start_stop_and_restart() {
    let patients = ward();
    let sink = RecordingAlertSink::default();
    let mut poller =
        AlertPoller::new(service(&patients), AlertSession::new(), Arc::new(sink), fast_config());

    assert!(!poller.is_running().await);
    assert!(matches!(poller.stop().await, Err(SchedulerError::NotRunning)));

    poller.start().await.unwrap();
    assert!(poller.is_running().await);
    assert!(matches!(poller.start().await, Err(SchedulerError::AlreadyRunning)));

    poller.stop().await.unwrap();
    assert!(!poller.is_running().await);

    let ticks_before = poller.stats().ticks();
    poller.start().await.unwrap();
    let stats = poller.stats();
    assert!(wait_until(WAIT, || stats.ticks() > ticks_before).await, "restarted poller never ticked");
    poller.stop().await.unwrap();
}

#[tokio::test]
async fn delivers_unacknowledged_alerts_each_tick() {
    let patients = ward();
    let sink = RecordingAlertSink::default();
    let session = AlertSession::new();
    session.acknowledge(1);

    let mut poller =
        AlertPoller::new(service(&patients), session.clone(), Arc::new(sink.clone()), fast_config());
    poller.start().await.unwrap();
    assert!(wait_until(WAIT, || sink.batch_count() >= 2).await, "expected repeated deliveries");
    poller.stop().await.unwrap();

    for batch in sink.batches() {
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].patient_id, 2);
        assert_eq!(batch[0].tier, RiskTier::Overdue);
        assert_eq!(batch[0].kind, AlertKind::CallDeadline);
    }
    // The poller reads the session but never acknowledges on its own.
    assert_eq!(session.acknowledged_count(), 1);
}

#[tokio::test]
async fn failed_fetch_is_retried_next_tick() {
    let patients = ward();
    patients.set_should_fail(true);
    let sink = RecordingAlertSink::default();
    let mut poller =
        AlertPoller::new(service(&patients), AlertSession::new(), Arc::new(sink.clone()), fast_config());
    let stats = poller.stats();

    poller.start().await.unwrap();
    assert!(wait_until(WAIT, || stats.failures() >= 2).await, "failures were not counted");
    assert_eq!(sink.batch_count(), 0);
    assert!(poller.is_running().await);

    patients.set_should_fail(false);
    assert!(wait_until(WAIT, || sink.batch_count() >= 1).await, "poller did not recover");
    poller.stop().await.unwrap();

    assert!(stats.delivered() >= 2);
    assert!(patients.calls() >= 3);
}

#[tokio::test]
async fn scan_now_skips_sink_when_nothing_alerts() {
    let patients = MockPatientSource::new(vec![in_process(3, "2024-01-09T12:00:00Z")]);
    let sink = RecordingAlertSink::default();
    let poller =
        AlertPoller::new(service(&patients), AlertSession::new(), Arc::new(sink.clone()), fast_config());

    assert_eq!(poller.scan_now().await.unwrap(), 0);
    assert_eq!(sink.batch_count(), 0);
    assert_eq!(poller.stats().ticks(), 1);
    assert!(!poller.is_running().await);
}

#[tokio::test]
async fn scan_now_orders_overdue_first() {
    let patients = ward();
    let sink = RecordingAlertSink::default();
    let poller =
        AlertPoller::new(service(&patients), AlertSession::new(), Arc::new(sink.clone()), fast_config());

    assert_eq!(poller.scan_now().await.unwrap(), 2);
    let batches = sink.batches();
    let ids: Vec<i64> = batches[0].iter().map(|alert| alert.patient_id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(poller.stats().delivered(), 2);
}

struct StalledSink;

#[async_trait]
impl AlertSink for StalledSink {
    async fn deliver(&self, _alerts: Vec<Alert>) -> asodi_domain::Result<()> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    }
}

#[tokio::test]
async fn slow_delivery_times_out_the_tick() {
    let patients = ward();
    let config = AlertPollerConfig { tick_timeout: Duration::from_millis(30), ..fast_config() };
    let poller =
        AlertPoller::new(service(&patients), AlertSession::new(), Arc::new(StalledSink), config);

    let err = poller.scan_now().await.unwrap_err();
    assert!(matches!(err, AsodiError::Internal(ref msg) if msg.contains("timed out")), "unexpected: {err:?}");
    assert_eq!(poller.stats().failures(), 1);
    assert_eq!(poller.stats().delivered(), 0);
}
