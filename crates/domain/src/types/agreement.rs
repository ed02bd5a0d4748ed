//! Agreement ("convenio") types
//!
//! An agreement is the contractual SLA profile a patient record refers to by
//! name.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::utils::serde::{lenient_f64, lenient_i64, null_as_default};

/// SLA profile keyed by its unique name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Agreement {
    /// Unique name; patient records reference it through `convenios`.
    #[serde(rename = "nombre_convenio", default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Hours allowed before the first call to a pending patient.
    #[cfg_attr(feature = "ts-gen", ts(type = "number | null"))]
    #[serde(rename = "horas_llamado", default, with = "lenient_f64")]
    pub call_window_hours: Option<f64>,
    /// Days allowed before an in-process patient must be operated.
    #[cfg_attr(feature = "ts-gen", ts(type = "number | null"))]
    #[serde(rename = "dias_para_operar", default, with = "lenient_i64")]
    pub operate_window_days: Option<i64>,
    /// Remaining days at or below which an in-process patient is at risk.
    #[cfg_attr(feature = "ts-gen", ts(type = "number | null"))]
    #[serde(rename = "dias_para_alertar", default, with = "lenient_i64")]
    pub alert_threshold_days: Option<i64>,
}

impl Agreement {
    /// Agreement with only the hourly call window set.
    pub fn hourly(name: impl Into<String>, call_window_hours: f64) -> Self {
        Self {
            name: name.into(),
            call_window_hours: Some(call_window_hours),
            operate_window_days: None,
            alert_threshold_days: None,
        }
    }

    /// Builder-style setter for the day-based window and alert threshold.
    pub fn with_operate_window(mut self, days: i64, alert_threshold_days: Option<i64>) -> Self {
        self.operate_window_days = Some(days);
        self.alert_threshold_days = alert_threshold_days;
        self
    }
}
