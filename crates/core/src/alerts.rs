//! Alert session context and alert scan
//!
//! The session holds which patients the user already acknowledged. It is an
//! explicit value handed to whoever needs it and is cleared on logout.

use std::collections::HashSet;
use std::sync::Arc;

use asodi_domain::{Alert, AlertKind, Remaining, TriageEntry};
use parking_lot::RwLock;

/// Acknowledged alerts of one user session
///
/// Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct AlertSession {
    acknowledged: Arc<RwLock<HashSet<i64>>>,
}

impl AlertSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a patient's alert as seen. Returns `false` if it already was.
    pub fn acknowledge(&self, patient_id: i64) -> bool {
        self.acknowledged.write().insert(patient_id)
    }

    pub fn acknowledge_all<'a>(&self, alerts: impl IntoIterator<Item = &'a Alert>) {
        let mut acknowledged = self.acknowledged.write();
        acknowledged.extend(alerts.into_iter().map(|alert| alert.patient_id));
    }

    pub fn is_acknowledged(&self, patient_id: i64) -> bool {
        self.acknowledged.read().contains(&patient_id)
    }

    pub fn acknowledged_count(&self) -> usize {
        self.acknowledged.read().len()
    }

    /// Forget every acknowledgement (session end).
    pub fn clear(&self) {
        self.acknowledged.write().clear();
    }
}

/// Alerts for every overdue or at-risk entry not yet acknowledged.
///
/// Overdue alerts come first; within a tier the entry with less time left
/// comes first.
pub fn scan_alerts(
    pending: &[TriageEntry],
    in_process: &[TriageEntry],
    session: &AlertSession,
) -> Vec<Alert> {
    let mut candidates: Vec<&TriageEntry> = pending
        .iter()
        .chain(in_process)
        .filter(|entry| entry.tier.is_alerting())
        .filter(|entry| !session.is_acknowledged(entry.patient.id))
        .collect();

    candidates.sort_by(|a, b| {
        a.tier
            .priority()
            .cmp(&b.tier.priority())
            .then_with(|| a.remaining.sort_key().total_cmp(&b.remaining.sort_key()))
    });

    candidates.into_iter().map(alert_for).collect()
}

fn alert_for(entry: &TriageEntry) -> Alert {
    let kind = match entry.remaining {
        Remaining::Hourly(_) => AlertKind::CallDeadline,
        Remaining::Daily(_) => AlertKind::OperationDeadline,
    };
    Alert {
        patient_id: entry.patient.id,
        patient_name: entry.patient.full_name(),
        agreement: entry.patient.agreement.clone(),
        kind,
        tier: entry.tier,
        display: entry.display().to_string(),
    }
}
