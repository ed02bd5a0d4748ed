//! SLA countdown calculator
//!
//! Pure functions: the same intake, window and `now` always produce the same
//! countdown. "Not applicable" (no window, bad timestamp) is `None`, never an
//! error.

use asodi_domain::constants::{
    AT_RISK_THRESHOLD_HOURS, CLAMPED_HOURLY_DISPLAY, SECONDS_PER_DAY, SECONDS_PER_HOUR,
};
use asodi_domain::{DailyCountdown, HourlyCountdown, RiskTier};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_HOUR: i64 = SECONDS_PER_HOUR * 1_000;
const MILLIS_PER_DAY: i64 = SECONDS_PER_DAY * 1_000;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a backend intake timestamp.
///
/// Accepts RFC 3339 with an offset, a naive date-time (taken as UTC) and a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_intake(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Remaining time against an hourly window.
///
/// `None` when the window is missing, zero, negative or not finite.
pub fn hourly_countdown(
    intake: DateTime<Utc>,
    window_hours: Option<f64>,
    now: DateTime<Utc>,
) -> Option<HourlyCountdown> {
    let window = window_hours.filter(|w| w.is_finite() && *w > 0.0)?;

    let elapsed_hours = (now - intake).num_milliseconds() as f64 / MILLIS_PER_HOUR as f64;
    let remaining_hours = window - elapsed_hours;

    if remaining_hours <= 0.0 {
        return Some(HourlyCountdown {
            remaining_hours,
            hours: 0,
            minutes: 0,
            display: CLAMPED_HOURLY_DISPLAY.to_string(),
        });
    }

    let whole_hours = remaining_hours.floor();
    let minutes = ((remaining_hours - whole_hours) * 60.0).floor() as i64;
    let hours = whole_hours as i64;

    Some(HourlyCountdown {
        remaining_hours,
        hours,
        minutes,
        display: format!("{hours} horas y {minutes} minutos"),
    })
}

/// Risk tier for a signed remaining-hours value.
///
/// Exactly zero is overdue.
pub fn hourly_tier(remaining_hours: f64) -> RiskTier {
    if remaining_hours <= 0.0 {
        RiskTier::Overdue
    } else if remaining_hours <= AT_RISK_THRESHOLD_HOURS {
        RiskTier::AtRisk
    } else {
        RiskTier::Normal
    }
}

/// Remaining time against a day-based window.
///
/// Elapsed time is the absolute distance between `now` and `intake`, so an
/// intake in the future counts the same as one in the past. The residual hour
/// and minute fields count up from the partial unit (`24 - elapsed hours of
/// the day`, `60 - elapsed minutes of the hour`). `remaining_seconds` drops
/// the partial minute, so intakes within the same minute tie; it saturates
/// instead of overflowing for absurd windows.
pub fn daily_countdown(
    intake: DateTime<Utc>,
    window_days: Option<i64>,
    now: DateTime<Utc>,
) -> Option<DailyCountdown> {
    let window = window_days.filter(|w| *w > 0)?;

    let elapsed_ms = (now - intake).num_milliseconds().abs();
    let days = window - elapsed_ms / MILLIS_PER_DAY;
    let hours = 24 - (elapsed_ms % MILLIS_PER_DAY) / MILLIS_PER_HOUR;
    let minutes = 60 - (elapsed_ms % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let elapsed_seconds = elapsed_ms / MILLIS_PER_MINUTE * 60;
    let remaining_seconds = window.saturating_mul(SECONDS_PER_DAY).saturating_sub(elapsed_seconds);

    Some(DailyCountdown {
        days,
        hours,
        minutes,
        remaining_seconds,
        display: format!("{days} días, {hours} horas y {minutes} minutos"),
    })
}

/// Risk tier for a day-based countdown.
///
/// Without a threshold only the overdue check applies.
pub fn daily_tier(days: i64, alert_threshold_days: Option<i64>) -> RiskTier {
    if days <= 0 {
        RiskTier::Overdue
    } else if alert_threshold_days.is_some_and(|threshold| days <= threshold) {
        RiskTier::AtRisk
    } else {
        RiskTier::Normal
    }
}
