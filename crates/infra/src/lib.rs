//! # ASODI Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The retrying HTTP client and the typed ASODI REST client
//! - Configuration loading from the environment or files
//! - Logging initialization
//! - The background alert poller
//!
//! ## Architecture
//! - Implements traits defined in `asodi-core`
//! - Contains all "impure" code (network, filesystem, timers)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;
pub mod scheduling;

// Re-export commonly used items
pub use api::{ApiError, ApiErrorCategory, AsodiClient, AsodiClientBuilder, AsodiClientConfig};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::init_logging;
pub use scheduling::{AlertPoller, AlertPollerConfig, PollerStats, SchedulerError};
