use std::sync::Arc;

use asodi_core::ports::AlertSink;
use asodi_domain::{Alert, Result, RiskTier};
use async_trait::async_trait;
use tracing::{info, warn};

/// Writes each alert as a structured log event.
#[derive(Debug, Default)]
pub struct LogAlertSink;

impl LogAlertSink {
    pub fn shared() -> Arc<dyn AlertSink> {
        Arc::new(Self)
    }
}

#[async_trait]
impl AlertSink for LogAlertSink {
    async fn deliver(&self, alerts: Vec<Alert>) -> Result<()> {
        for alert in &alerts {
            match alert.tier {
                RiskTier::Overdue => warn!(
                    patient_id = alert.patient_id,
                    patient = %alert.patient_name,
                    agreement = %alert.agreement,
                    kind = ?alert.kind,
                    remaining = %alert.display,
                    "Patient overdue"
                ),
                _ => info!(
                    patient_id = alert.patient_id,
                    patient = %alert.patient_name,
                    agreement = %alert.agreement,
                    kind = ?alert.kind,
                    remaining = %alert.display,
                    "Patient at risk"
                ),
            }
        }
        Ok(())
    }
}
