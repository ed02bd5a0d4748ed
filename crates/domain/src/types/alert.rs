//! Alert types raised by the periodic SLA scan

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::types::triage::RiskTier;

/// Which deadline an alert is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// First-contact deadline of a pending patient.
    CallDeadline,
    /// Operation deadline of an in-process patient.
    OperationDeadline,
}

/// Notification about an overdue or at-risk patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Alert {
    pub patient_id: i64,
    pub patient_name: String,
    pub agreement: String,
    pub kind: AlertKind,
    pub tier: RiskTier,
    /// Remaining-time display string of the triage entry.
    pub display: String,
}
