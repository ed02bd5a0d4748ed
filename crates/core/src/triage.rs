//! Triage sorter
//!
//! Joins patient records to their agreement, computes the countdown and risk
//! tier for each applicable record and orders the result most urgent first.

use std::collections::HashMap;
use std::fmt;

use asodi_domain::{Agreement, PatientRecord, PatientStatus, Remaining, RiskTier, TriageEntry};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::sla;

/// Name → agreement lookup built once per evaluation
///
/// Names match exactly and case-sensitively. When the backend returns two
/// agreements with the same name the first one wins. Blank names are never
/// indexed, so a record without an agreement never resolves.
#[derive(Debug, Clone, Default)]
pub struct AgreementIndex<'a> {
    by_name: HashMap<&'a str, &'a Agreement>,
}

impl<'a> AgreementIndex<'a> {
    pub fn new(agreements: &'a [Agreement]) -> Self {
        let mut by_name = HashMap::with_capacity(agreements.len());
        for agreement in agreements.iter().filter(|a| !a.name.trim().is_empty()) {
            by_name.entry(agreement.name.as_str()).or_insert(agreement);
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a Agreement> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Why a record was left out of a triage list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    UnknownAgreement,
    NoWindow,
    InvalidIntake,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::UnknownAgreement => "agreement not found",
            Self::NoWindow => "agreement has no SLA window",
            Self::InvalidIntake => "intake timestamp missing or invalid",
        };
        f.write_str(reason)
    }
}

/// Stable ascending sort on the remaining time; ties keep input order.
pub fn sort_by_urgency(mut entries: Vec<TriageEntry>) -> Vec<TriageEntry> {
    entries.sort_by(|a, b| a.remaining.sort_key().total_cmp(&b.remaining.sort_key()));
    entries
}

/// Pending records against their hourly call window, most urgent first.
pub fn triage_pending(
    patients: &[PatientRecord],
    agreements: &[Agreement],
    now: DateTime<Utc>,
) -> Vec<TriageEntry> {
    let index = AgreementIndex::new(agreements);
    let entries = patients
        .iter()
        .filter(|patient| patient.status == PatientStatus::Pending)
        .filter_map(|patient| log_exclusion(patient, evaluate_pending(patient, &index, now)))
        .collect();
    sort_by_urgency(entries)
}

/// In-process records against their day-based operate window, most urgent
/// first.
pub fn triage_in_process(
    patients: &[PatientRecord],
    agreements: &[Agreement],
    now: DateTime<Utc>,
) -> Vec<TriageEntry> {
    let index = AgreementIndex::new(agreements);
    let entries = patients
        .iter()
        .filter(|patient| patient.status == PatientStatus::InProcess)
        .filter_map(|patient| log_exclusion(patient, evaluate_in_process(patient, &index, now)))
        .collect();
    sort_by_urgency(entries)
}

/// Evaluate one pending record.
pub fn evaluate_pending(
    patient: &PatientRecord,
    index: &AgreementIndex<'_>,
    now: DateTime<Utc>,
) -> Result<TriageEntry, Exclusion> {
    let agreement = index.get(&patient.agreement).ok_or(Exclusion::UnknownAgreement)?;
    let intake = intake_of(patient)?;
    let countdown =
        sla::hourly_countdown(intake, agreement.call_window_hours, now).ok_or(Exclusion::NoWindow)?;
    let tier = sla::hourly_tier(countdown.remaining_hours);

    Ok(TriageEntry { patient: patient.clone(), remaining: Remaining::Hourly(countdown), tier })
}

/// Evaluate one in-process record.
pub fn evaluate_in_process(
    patient: &PatientRecord,
    index: &AgreementIndex<'_>,
    now: DateTime<Utc>,
) -> Result<TriageEntry, Exclusion> {
    let agreement = index.get(&patient.agreement).ok_or(Exclusion::UnknownAgreement)?;
    let intake = intake_of(patient)?;
    let countdown = sla::daily_countdown(intake, agreement.operate_window_days, now)
        .ok_or(Exclusion::NoWindow)?;
    let tier = sla::daily_tier(countdown.days, agreement.alert_threshold_days);

    Ok(TriageEntry { patient: patient.clone(), remaining: Remaining::Daily(countdown), tier })
}

fn intake_of(patient: &PatientRecord) -> Result<DateTime<Utc>, Exclusion> {
    patient.intake_at.as_deref().and_then(sla::parse_intake).ok_or(Exclusion::InvalidIntake)
}

fn log_exclusion(
    patient: &PatientRecord,
    outcome: Result<TriageEntry, Exclusion>,
) -> Option<TriageEntry> {
    match outcome {
        Ok(entry) => Some(entry),
        Err(reason) => {
            debug!(
                patient_id = patient.id,
                agreement = %patient.agreement,
                %reason,
                "Patient excluded from triage"
            );
            None
        }
    }
}

/// Per-tier counts of a triage list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TriageSummary {
    pub overdue: usize,
    pub at_risk: usize,
    pub normal: usize,
}

impl TriageSummary {
    pub fn from_entries(entries: &[TriageEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut summary, entry| {
            match entry.tier {
                RiskTier::Overdue => summary.overdue += 1,
                RiskTier::AtRisk => summary.at_risk += 1,
                RiskTier::Normal => summary.normal += 1,
            }
            summary
        })
    }

    pub const fn total(&self) -> usize {
        self.overdue + self.at_risk + self.normal
    }

    /// Entries that would raise an alert.
    pub const fn alerting(&self) -> usize {
        self.overdue + self.at_risk
    }
}
