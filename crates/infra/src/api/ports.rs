//! Core port implementations backed by the REST client

use asodi_core::ports::{AgreementSource, PatientSource};
use asodi_domain::{Agreement, AsodiError, PatientRecord, Result};
use async_trait::async_trait;

use super::client::AsodiClient;

#[async_trait]
impl PatientSource for AsodiClient {
    async fn list_patients(&self) -> Result<Vec<PatientRecord>> {
        self.list_patient_records().await.map_err(AsodiError::from)
    }
}

#[async_trait]
impl AgreementSource for AsodiClient {
    async fn list_agreements(&self) -> Result<Vec<Agreement>> {
        AsodiClient::list_agreements(self).await.map_err(AsodiError::from)
    }
}
