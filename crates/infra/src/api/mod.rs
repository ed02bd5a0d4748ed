//! REST client for the ASODI backend
//!
//! - `client`: transport, status mapping and timeouts
//! - `endpoints`: resource paths
//! - `resources`: typed operations per resource
//! - `ports`: `PatientSource` / `AgreementSource` for the core service

pub mod client;
pub mod endpoints;
pub mod errors;
mod ports;
mod resources;

pub use client::{AsodiClient, AsodiClientBuilder, AsodiClientConfig};
pub use errors::{ApiError, ApiErrorCategory};
