//! # ASODI Domain
//!
//! Business domain types for the ASODI referral triage workspace.
//!
//! This crate contains:
//! - Backend resource types (agreements, patient records, requests,
//!   announcements, user accounts)
//! - Derived triage types (countdowns, risk tiers, triage entries)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - RUT formatting and validation helpers
//!
//! ## Architecture
//! - No dependencies on other ASODI crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::rut::{check_digit, format_rut, is_valid_rut, is_valid_rut_format};
