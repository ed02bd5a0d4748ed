//! Domain constants
//!
//! Centralized location for the fixed thresholds and labels shared by the
//! SLA calculator, the backend client and the alert poller.

// SLA thresholds
/// Hourly SLA: remaining time at or below this many hours is `AtRisk`.
pub const AT_RISK_THRESHOLD_HOURS: f64 = 4.0;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

// Display strings (rendered as-is by the list views)
pub const CLAMPED_HOURLY_DISPLAY: &str = "0 horas";

// Backend
pub const API_PREFIX: &str = "/asodi/v1";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_MAX_ATTEMPTS: usize = 3;

// Alert polling
pub const DEFAULT_ALERT_POLL_INTERVAL_SECS: u64 = 60;

