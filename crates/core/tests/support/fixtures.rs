//! Fixture builders for patients and agreements

use asodi_domain::{Agreement, PatientRecord, PatientStatus};
use chrono::{DateTime, TimeZone, Utc};

/// Frozen "now" used by every scenario: 2024-01-10T12:00:00Z.
pub fn scenario_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
}

pub fn pending(id: i64, agreement: &str, intake: &str) -> PatientRecord {
    PatientRecord::new(id, format!("{id}.000.000-0"), agreement, PatientStatus::Pending, Some(intake.into()))
        .with_name(format!("Paciente{id}"), "Prueba")
}

pub fn in_process(id: i64, agreement: &str, intake: &str) -> PatientRecord {
    PatientRecord::new(id, format!("{id}.000.000-0"), agreement, PatientStatus::InProcess, Some(intake.into()))
        .with_name(format!("Paciente{id}"), "Prueba")
}

/// Agreement with a 4 hour call window and a 10 day operate window alerting at
/// 3 days.
pub fn fonasa() -> Agreement {
    Agreement::hourly("FONASA", 4.0).with_operate_window(10, Some(3))
}
