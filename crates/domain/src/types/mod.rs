//! Domain types and models
//!
//! Backend resources keep the backend's Spanish JSON keys on the wire and
//! expose English field names in Rust.

pub mod agreement;
pub mod alert;
pub mod announcement;
pub mod patient;
pub mod request;
pub mod triage;
pub mod user;

pub use agreement::Agreement;
pub use alert::{Alert, AlertKind};
pub use announcement::{Announcement, AnnouncementUpdate, ImageUpload, NewAnnouncement};
pub use patient::{NewPatient, PatientRecord, PatientStatus};
pub use request::{NewRequest, Request, RequestStatus};
pub use triage::{DailyCountdown, HourlyCountdown, Remaining, RiskTier, TriageEntry};
pub use user::{AdUser, RegistryPerson};
