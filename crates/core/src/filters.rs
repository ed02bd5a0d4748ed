//! List filters for patients, requests and triage views
//!
//! Blank text criteria count as unset, the way an empty form field does.

use asodi_domain::{PatientRecord, PatientStatus, Request, RequestStatus, TriageEntry};
use chrono::NaiveDate;

/// Criteria for patient lists; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFilter {
    /// Substring of the decimal record id.
    pub id: Option<String>,
    /// Substring of the RUT as stored.
    pub rut: Option<String>,
    /// Calendar date of the intake timestamp.
    pub intake_date: Option<NaiveDate>,
    pub status: Option<PatientStatus>,
    /// Exact agreement name.
    pub agreement: Option<String>,
}

impl PatientFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_rut(mut self, rut: impl Into<String>) -> Self {
        self.rut = Some(rut.into());
        self
    }

    pub fn with_intake_date(mut self, date: NaiveDate) -> Self {
        self.intake_date = Some(date);
        self
    }

    pub fn with_status(mut self, status: PatientStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_agreement(mut self, agreement: impl Into<String>) -> Self {
        self.agreement = Some(agreement.into());
        self
    }

    pub fn matches(&self, patient: &PatientRecord) -> bool {
        let id_ok = active(&self.id).is_none_or(|id| patient.id.to_string().contains(id));
        let rut_ok = active(&self.rut).is_none_or(|rut| patient.rut.contains(rut));
        let date_ok = self.intake_date.is_none_or(|date| intake_day(patient) == Some(date));
        let status_ok = self.status.is_none_or(|status| patient.status == status);
        let agreement_ok =
            active(&self.agreement).is_none_or(|agreement| patient.agreement == agreement);

        id_ok && rut_ok && date_ok && status_ok && agreement_ok
    }

    pub fn apply<'a>(&self, patients: &'a [PatientRecord]) -> Vec<&'a PatientRecord> {
        patients.iter().filter(|patient| self.matches(patient)).collect()
    }

    /// Filter a sorted triage list without disturbing its urgency order.
    pub fn apply_to_entries(&self, mut entries: Vec<TriageEntry>) -> Vec<TriageEntry> {
        entries.retain(|entry| self.matches(&entry.patient));
        entries
    }
}

/// The criterion that emptied a request listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestCriterion {
    Status,
    CreatedOn,
    RequestId,
    PatientRecord,
}

/// Result of filtering requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFilterOutcome<'a> {
    pub matches: Vec<&'a Request>,
    /// Last criterion that left no matches, for the "no results for ..." hint.
    pub failed_on: Option<RequestCriterion>,
}

/// Criteria for request lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    /// Only requests made by this RUT.
    pub requested_by: Option<String>,
    pub status: Option<RequestStatus>,
    pub created_on: Option<NaiveDate>,
    /// Substring of the decimal request id.
    pub request_id: Option<String>,
    pub patient_record_id: Option<i64>,
}

impl RequestFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requested_by(mut self, rut: impl Into<String>) -> Self {
        self.requested_by = Some(rut.into());
        self
    }

    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_created_on(mut self, date: NaiveDate) -> Self {
        self.created_on = Some(date);
        self
    }

    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn with_patient_record(mut self, id: i64) -> Self {
        self.patient_record_id = Some(id);
        self
    }

    pub fn matches(&self, request: &Request) -> bool {
        active(&self.requested_by).is_none_or(|rut| request.requested_by == rut)
            && self.status.is_none_or(|status| request.status == status)
            && self.created_on.is_none_or(|date| request.created_on == date)
            && active(&self.request_id).is_none_or(|id| request.id.to_string().contains(id))
            && self.patient_record_id.is_none_or(|id| request.patient_record_id == id)
    }

    /// Apply the criteria one at a time, remembering which one emptied the
    /// list.
    pub fn apply<'a>(&self, requests: &'a [Request]) -> RequestFilterOutcome<'a> {
        let mut matches: Vec<&Request> = match active(&self.requested_by) {
            Some(rut) => requests.iter().filter(|r| r.requested_by == rut).collect(),
            None => requests.iter().collect(),
        };
        let mut failed_on = None;

        let mut narrow = |criterion: RequestCriterion, keep: &dyn Fn(&Request) -> bool| {
            matches.retain(|request| keep(*request));
            if matches.is_empty() {
                failed_on = Some(criterion);
            }
        };

        if let Some(status) = self.status {
            narrow(RequestCriterion::Status, &|r: &Request| r.status == status);
        }
        if let Some(date) = self.created_on {
            narrow(RequestCriterion::CreatedOn, &|r: &Request| r.created_on == date);
        }
        if let Some(id) = active(&self.request_id) {
            narrow(RequestCriterion::RequestId, &|r: &Request| r.id.to_string().contains(id));
        }
        if let Some(record) = self.patient_record_id {
            narrow(RequestCriterion::PatientRecord, &|r: &Request| r.patient_record_id == record);
        }

        RequestFilterOutcome { matches, failed_on }
    }
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

fn intake_day(patient: &PatientRecord) -> Option<NaiveDate> {
    let raw = patient.intake_at.as_deref()?;
    let day = raw.split('T').next()?.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(id: i64, rut: &str, agreement: &str, status: PatientStatus, intake: &str) -> PatientRecord {
        PatientRecord::new(id, rut, agreement, status, Some(intake.to_string()))
    }

    fn request(id: i64, status: RequestStatus, day: u32, record: i64, by: &str) -> Request {
        Request {
            id,
            reason: "Cambio de convenio".into(),
            status,
            created_on: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            patient_record_id: record,
            requested_by: by.into(),
        }
    }

    fn patients() -> Vec<PatientRecord> {
        vec![
            patient(12, "12.345.678-5", "FONASA", PatientStatus::Pending, "2024-01-10T10:00:00-03:00"),
            patient(21, "9.876.543-2", "ISAPRE", PatientStatus::InProcess, "2024-01-09T08:00:00Z"),
            patient(120, "11.111.111-1", "FONASA", PatientStatus::Rejected, "2024-01-10"),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let list = patients();
        assert_eq!(PatientFilter::new().apply(&list).len(), 3);
        assert_eq!(PatientFilter::new().with_rut("  ").apply(&list).len(), 3);
    }

    #[test]
    fn id_and_rut_match_by_substring() {
        let list = patients();
        let ids: Vec<i64> =
            PatientFilter::new().with_id("12").apply(&list).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![12, 120]);

        let ruts = PatientFilter::new().with_rut("876").apply(&list);
        assert_eq!(ruts.len(), 1);
        assert_eq!(ruts[0].id, 21);
    }

    #[test]
    fn date_status_and_agreement_combine() {
        let list = patients();
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        assert_eq!(PatientFilter::new().with_intake_date(day).apply(&list).len(), 2);
        let filtered = PatientFilter::new()
            .with_intake_date(day)
            .with_status(PatientStatus::Pending)
            .with_agreement("FONASA")
            .apply(&list);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 12);
        assert!(PatientFilter::new().with_agreement("fonasa").apply(&list).is_empty());
    }

    #[test]
    fn request_filter_reports_emptying_criterion() {
        let requests = vec![
            request(1, RequestStatus::Pending, 5, 12, "1-9"),
            request(2, RequestStatus::Approved, 6, 12, "1-9"),
            request(3, RequestStatus::Pending, 6, 21, "2-7"),
        ];

        let outcome = RequestFilter::new().with_requested_by("1-9").apply(&requests);
        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(outcome.failed_on, None);

        let outcome = RequestFilter::new()
            .with_requested_by("1-9")
            .with_status(RequestStatus::Pending)
            .with_created_on(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap())
            .apply(&requests);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.failed_on, Some(RequestCriterion::CreatedOn));

        let outcome = RequestFilter::new().with_patient_record(21).apply(&requests);
        assert_eq!(outcome.matches.len(), 1);
        assert!(RequestFilter::new().with_request_id("3").matches(&requests[2]));
    }
}
