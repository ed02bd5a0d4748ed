//! Derived triage types
//!
//! None of these are persisted: they are recomputed from the current instant
//! on every evaluation, so two evaluations of the same record at different
//! instants may disagree.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::SECONDS_PER_HOUR;
use crate::types::patient::PatientRecord;

/// Urgency classification of the remaining SLA time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// Deadline reached or passed (remaining ≤ 0).
    Overdue,
    /// Deadline close (within the near-term threshold).
    AtRisk,
    Normal,
}

impl RiskTier {
    /// Lower is more urgent.
    pub const fn priority(self) -> u8 {
        match self {
            Self::Overdue => 0,
            Self::AtRisk => 1,
            Self::Normal => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overdue => "Alto riesgo",
            Self::AtRisk => "Riesgo moderado",
            Self::Normal => "Normal",
        }
    }

    /// Overdue and at-risk entries raise alerts; normal ones never do.
    pub const fn is_alerting(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Countdown against an hourly SLA window (pending patients)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
pub struct HourlyCountdown {
    /// Signed remaining hours, exact; negative means overdue.
    pub remaining_hours: f64,
    /// Whole hours of the display decomposition (0 when overdue).
    pub hours: i64,
    /// Whole minutes of the display decomposition (0 when overdue).
    pub minutes: i64,
    pub display: String,
}

/// Countdown against a day-based SLA window (in-process patients)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
pub struct DailyCountdown {
    /// Window minus whole elapsed days.
    pub days: i64,
    /// Residual hours of the partial day.
    pub hours: i64,
    /// Residual minutes of the partial hour.
    pub minutes: i64,
    /// Signed remaining seconds; used for ordering.
    pub remaining_seconds: i64,
    pub display: String,
}

/// Remaining time of a triage entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Remaining {
    Hourly(HourlyCountdown),
    Daily(DailyCountdown),
}

impl Remaining {
    /// Signed remaining hours used as the urgency sort key.
    pub fn sort_key(&self) -> f64 {
        match self {
            Self::Hourly(countdown) => countdown.remaining_hours,
            Self::Daily(countdown) => countdown.remaining_seconds as f64 / SECONDS_PER_HOUR as f64,
        }
    }

    pub fn display(&self) -> &str {
        match self {
            Self::Hourly(countdown) => &countdown.display,
            Self::Daily(countdown) => &countdown.display,
        }
    }
}

/// One patient in a triage list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct TriageEntry {
    pub patient: PatientRecord,
    pub remaining: Remaining,
    pub tier: RiskTier,
}

impl TriageEntry {
    pub fn display(&self) -> &str {
        self.remaining.display()
    }
}
