//! Request ("solicitud") types
//!
//! Staff users file requests about a patient record; administrators approve
//! or reject them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::impl_status_codes;

/// Review status of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Approved,
    Pending,
    Rejected,
}

impl_status_codes!(RequestStatus {
    Approved => "A",
    Pending => "P",
    Rejected => "R",
});

impl RequestStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "Aprobado",
            Self::Pending => "Pendiente",
            Self::Rejected => "Rechazado",
        }
    }
}

/// A request as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Request {
    #[serde(rename = "id_soli")]
    pub id: i64,
    #[serde(rename = "motivo")]
    pub reason: String,
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    #[serde(rename = "estado")]
    pub status: RequestStatus,
    #[serde(rename = "fecha_creacion")]
    pub created_on: NaiveDate,
    /// Id of the patient record the request is about.
    #[serde(rename = "planilla_convenio")]
    pub patient_record_id: i64,
    /// RUT of the requesting staff account.
    #[serde(rename = "usuario_solicitante")]
    pub requested_by: String,
}

/// Payload for filing a new request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRequest {
    #[serde(rename = "motivo")]
    pub reason: String,
    #[serde(rename = "estado")]
    pub status: RequestStatus,
    #[serde(rename = "fecha_creacion")]
    pub created_on: NaiveDate,
    #[serde(rename = "planilla_convenio")]
    pub patient_record_id: i64,
    #[serde(rename = "usuario_solicitante")]
    pub requested_by: String,
}
