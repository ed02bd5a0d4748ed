//! Patient and request workflow rules
//!
//! Status progression, rejection and the checks applied before a new patient
//! record or request is sent to the backend.

use asodi_domain::{
    format_rut, is_valid_rut_format, Agreement, AsodiError, NewPatient, NewRequest,
    PatientRecord, PatientStatus, RequestStatus,
};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::America::Santiago;
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

static FORM_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("FORM_DATE regex should compile")
});

/// Rule violations raised by the workflow checks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("patient {id} is {status} and cannot advance")]
    CannotAdvance { id: i64, status: PatientStatus },

    #[error("patient {id} is {status} and cannot be rejected")]
    CannotReject { id: i64, status: PatientStatus },

    #[error("a rejection reason is required")]
    MissingRejectionReason,

    #[error("RUT {0} is not in 12.345.678-9 format")]
    InvalidRut(String),

    #[error("a patient with RUT {0} already exists")]
    DuplicateRut(String),

    #[error("agreement {0} does not exist")]
    UnknownAgreement(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("patient record id {0} is not a number")]
    InvalidRecordId(String),

    #[error("patient record {0} does not exist")]
    UnknownRecord(i64),
}

impl From<WorkflowError> for AsodiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::UnknownRecord(_) | WorkflowError::UnknownAgreement(_) => {
                Self::NotFound(err.to_string())
            }
            WorkflowError::InvalidRut(_) | WorkflowError::InvalidRecordId(_) => {
                Self::InvalidInput(err.to_string())
            }
            _ => Self::Validation(err.to_string()),
        }
    }
}

/// Current instant in clinic local time.
pub fn clinic_now(now: DateTime<Utc>) -> DateTime<Tz> {
    now.with_timezone(&Santiago)
}

/// Move a record one step along `P → E → O → A`.
///
/// Entering `InProcess` restarts the day-based SLA: the intake timestamp is
/// reset to `now` in clinic local time with its UTC offset.
pub fn advance_status(
    record: &PatientRecord,
    now: DateTime<Utc>,
) -> Result<PatientRecord, WorkflowError> {
    let next = record
        .status
        .next()
        .ok_or(WorkflowError::CannotAdvance { id: record.id, status: record.status })?;

    let mut updated = record.clone();
    updated.status = next;
    if next == PatientStatus::InProcess {
        let reset = clinic_now(now).format("%Y-%m-%dT%H:%M:%S%:z").to_string();
        debug!(patient_id = record.id, intake_at = %reset, "Intake reset on entering process");
        updated.intake_at = Some(reset);
    }
    Ok(updated)
}

/// Mark a record as rejected with a reason.
pub fn reject(record: &PatientRecord, reason: &str) -> Result<PatientRecord, WorkflowError> {
    if record.status.is_terminal() {
        return Err(WorkflowError::CannotReject { id: record.id, status: record.status });
    }
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(WorkflowError::MissingRejectionReason);
    }

    let mut updated = record.clone();
    updated.status = PatientStatus::Rejected;
    updated.rejection_reason = Some(reason.to_string());
    Ok(updated)
}

/// Keep a follow-up date only when it is a plain `YYYY-MM-DD`.
pub fn normalize_form_date(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| FORM_DATE.is_match(v)).map(str::to_string)
}

/// Apply [`normalize_form_date`] to every follow-up date of an edited record.
pub fn normalize_follow_up_dates(record: &mut PatientRecord) {
    for field in [
        &mut record.second_call_on,
        &mut record.third_call_on,
        &mut record.evaluation_on,
        &mut record.surgery_on,
        &mut record.post_op_control_on,
        &mut record.monthly_control_on,
    ] {
        *field = normalize_form_date(field.as_deref());
    }
}

/// Check and normalize a new patient before it is submitted.
///
/// The RUT is reformatted, the agreement must be one of the loaded ones, the
/// RUT must not already be registered and the status always starts pending.
pub fn prepare_new_patient(
    mut patient: NewPatient,
    agreements: &[Agreement],
    existing: &[PatientRecord],
) -> Result<NewPatient, WorkflowError> {
    patient.rut = format_rut(&patient.rut);
    if !is_valid_rut_format(&patient.rut) {
        return Err(WorkflowError::InvalidRut(patient.rut));
    }
    if patient.first_name.trim().is_empty() {
        return Err(WorkflowError::MissingField("nombre_paciente"));
    }
    if !agreements.iter().any(|agreement| agreement.name == patient.agreement) {
        return Err(WorkflowError::UnknownAgreement(patient.agreement));
    }
    if existing.iter().any(|record| record.rut == patient.rut) {
        return Err(WorkflowError::DuplicateRut(patient.rut));
    }

    patient.status = PatientStatus::Pending;
    patient.sic_date = normalize_form_date(patient.sic_date.as_deref());
    patient.first_call_on = normalize_form_date(patient.first_call_on.as_deref());
    Ok(patient)
}

/// Build a new pending request from form input.
///
/// `record_id` is the raw text typed by the user.
pub fn prepare_new_request(
    reason: &str,
    record_id: &str,
    requested_by: &str,
    existing: &[PatientRecord],
    today: NaiveDate,
) -> Result<NewRequest, WorkflowError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(WorkflowError::MissingField("motivo"));
    }
    if requested_by.trim().is_empty() {
        return Err(WorkflowError::MissingField("usuario_solicitante"));
    }

    let record_id = record_id.trim();
    let patient_record_id: i64 =
        record_id.parse().map_err(|_| WorkflowError::InvalidRecordId(record_id.to_string()))?;
    if !existing.iter().any(|record| record.id == patient_record_id) {
        return Err(WorkflowError::UnknownRecord(patient_record_id));
    }

    Ok(NewRequest {
        reason: reason.to_string(),
        status: RequestStatus::Pending,
        created_on: today,
        patient_record_id,
        requested_by: requested_by.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    fn record(status: PatientStatus) -> PatientRecord {
        PatientRecord::new(7, "12.345.678-5", "FONASA", status, Some("2024-01-01T09:00:00Z".into()))
    }

    fn new_patient(rut: &str, agreement: &str) -> NewPatient {
        NewPatient {
            rut: rut.into(),
            first_name: "Ana".into(),
            last_name: "Rojas".into(),
            agreement: agreement.into(),
            status: PatientStatus::Operated,
            doctor: None,
            notes: None,
            sic_date: Some("10/01/2024".into()),
            first_call_on: Some("2024-01-11".into()),
            registered_by: None,
        }
    }

    #[test]
    fn entering_process_resets_intake_in_clinic_time() {
        let updated = advance_status(&record(PatientStatus::Pending), now()).unwrap();
        assert_eq!(updated.status, PatientStatus::InProcess);
        // January is daylight saving time in Santiago (UTC-3).
        assert_eq!(updated.intake_at.as_deref(), Some("2024-01-10T09:00:00-03:00"));
    }

    #[test]
    fn later_steps_keep_intake() {
        let updated = advance_status(&record(PatientStatus::InProcess), now()).unwrap();
        assert_eq!(updated.status, PatientStatus::Operated);
        assert_eq!(updated.intake_at.as_deref(), Some("2024-01-01T09:00:00Z"));

        let discharged = advance_status(&updated, now()).unwrap();
        assert_eq!(discharged.status, PatientStatus::Discharged);
        assert!(matches!(
            advance_status(&discharged, now()),
            Err(WorkflowError::CannotAdvance { status: PatientStatus::Discharged, .. })
        ));
    }

    #[test]
    fn rejection_needs_reason_and_is_terminal() {
        assert_eq!(
            reject(&record(PatientStatus::Pending), "   "),
            Err(WorkflowError::MissingRejectionReason)
        );
        let rejected = reject(&record(PatientStatus::InProcess), " No contesta ").unwrap();
        assert_eq!(rejected.status, PatientStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("No contesta"));
        assert!(advance_status(&rejected, now()).is_err());
        assert!(reject(&rejected, "otra vez").is_err());
    }

    #[test]
    fn form_dates_must_be_iso_days() {
        assert_eq!(normalize_form_date(Some("2024-02-01")), Some("2024-02-01".into()));
        assert_eq!(normalize_form_date(Some("01-02-2024")), None);
        assert_eq!(normalize_form_date(Some("")), None);
        assert_eq!(normalize_form_date(None), None);

        let mut edited = record(PatientStatus::Operated);
        edited.surgery_on = Some("2024-02-01T10:00".into());
        edited.evaluation_on = Some("2024-01-20".into());
        normalize_follow_up_dates(&mut edited);
        assert_eq!(edited.surgery_on, None);
        assert_eq!(edited.evaluation_on.as_deref(), Some("2024-01-20"));
    }

    #[test]
    fn new_patient_is_normalized() {
        let agreements = vec![Agreement::hourly("FONASA", 48.0)];
        let prepared = prepare_new_patient(new_patient("98765432", "FONASA"), &agreements, &[]).unwrap();
        assert_eq!(prepared.rut, "9.876.543-2");
        assert_eq!(prepared.status, PatientStatus::Pending);
        assert_eq!(prepared.sic_date, None);
        assert_eq!(prepared.first_call_on.as_deref(), Some("2024-01-11"));
    }

    #[test]
    fn new_patient_rejections() {
        let agreements = vec![Agreement::hourly("FONASA", 48.0)];
        let existing = vec![record(PatientStatus::Pending)];

        assert_eq!(
            prepare_new_patient(new_patient("123456785", "FONASA"), &agreements, &existing),
            Err(WorkflowError::DuplicateRut("12.345.678-5".into()))
        );
        assert_eq!(
            prepare_new_patient(new_patient("98765432", "ISAPRE"), &agreements, &existing),
            Err(WorkflowError::UnknownAgreement("ISAPRE".into()))
        );
        assert!(matches!(
            prepare_new_patient(new_patient("123", "FONASA"), &agreements, &existing),
            Err(WorkflowError::InvalidRut(_))
        ));
    }

    #[test]
    fn new_request_checks_record_id() {
        let existing = vec![record(PatientStatus::Pending)];
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let request =
            prepare_new_request("Cambio de doctor", " 7 ", "1-9", &existing, today).unwrap();
        assert_eq!(request.patient_record_id, 7);
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.created_on, today);

        assert_eq!(
            prepare_new_request("x", "abc", "1-9", &existing, today),
            Err(WorkflowError::InvalidRecordId("abc".into()))
        );
        assert_eq!(
            prepare_new_request("x", "99", "1-9", &existing, today),
            Err(WorkflowError::UnknownRecord(99))
        );
        assert_eq!(
            prepare_new_request(" ", "7", "1-9", &existing, today),
            Err(WorkflowError::MissingField("motivo"))
        );
    }

    #[test]
    fn converts_into_domain_error() {
        let err: AsodiError = WorkflowError::UnknownRecord(3).into();
        assert!(matches!(err, AsodiError::NotFound(_)));
        let err: AsodiError = WorkflowError::MissingRejectionReason.into();
        assert!(matches!(err, AsodiError::Validation(_)));
    }
}
