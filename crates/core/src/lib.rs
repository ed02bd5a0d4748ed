//! # ASODI Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The SLA countdown calculator and triage sorter
//! - List filters and workflow rules
//! - The alert session context and alert scan
//! - Port interfaces (traits) and the triage service
//!
//! ## Architecture Principles
//! - Only depends on `asodi-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - "Now" is always injected

pub mod alerts;
pub mod clock;
pub mod filters;
pub mod ports;
pub mod service;
pub mod sla;
pub mod triage;
pub mod workflow;

pub use alerts::{scan_alerts, AlertSession};
pub use clock::{Clock, FixedClock, SystemClock};
pub use filters::{PatientFilter, RequestCriterion, RequestFilter, RequestFilterOutcome};
pub use ports::{AgreementSource, AlertSink, PatientSource};
pub use service::TriageService;
pub use triage::{sort_by_urgency, triage_in_process, triage_pending, AgreementIndex, TriageSummary};
pub use workflow::WorkflowError;
