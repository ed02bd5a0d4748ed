//! Patient record ("planilla convenio") types

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::impl_status_codes;
use crate::utils::serde::null_as_default;

/// Lifecycle status of a patient record
///
/// Only `Pending` records are measured against the hourly call window and
/// only `InProcess` records against the day-based operate window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatientStatus {
    Pending,
    InProcess,
    Operated,
    Discharged,
    Rejected,
}

impl_status_codes!(PatientStatus {
    Pending => "P",
    InProcess => "E",
    Operated => "O",
    Discharged => "A",
    Rejected => "R",
});

impl PatientStatus {
    /// All statuses in progression order, rejected last.
    pub const ALL: [Self; 5] =
        [Self::Pending, Self::InProcess, Self::Operated, Self::Discharged, Self::Rejected];

    /// Next status in the `P → E → O → A` progression.
    ///
    /// `None` for `Discharged` (final) and `Rejected` (terminal).
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::InProcess),
            Self::InProcess => Some(Self::Operated),
            Self::Operated => Some(Self::Discharged),
            Self::Discharged | Self::Rejected => None,
        }
    }

    /// Label shown in status pickers.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::InProcess => "En Proceso",
            Self::Operated => "Operado",
            Self::Discharged => "Alta",
            Self::Rejected => "Rechazado",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Discharged | Self::Rejected)
    }
}

/// A patient record as stored by the backend
///
/// `intake_at` is kept as the raw backend string: an unparsable or missing
/// timestamp must exclude the record from triage instead of failing the whole
/// list deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct PatientRecord {
    #[serde(rename = "id_planilla")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rut: String,
    #[serde(rename = "nombre_paciente", default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(rename = "apellido_paciente", default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(rename = "fecha_recepcion", default)]
    pub intake_at: Option<String>,
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    #[serde(rename = "estado_paciente")]
    pub status: PatientStatus,
    /// Agreement name (join key into [`Agreement::name`](crate::Agreement)).
    #[serde(rename = "convenios", default, deserialize_with = "null_as_default")]
    pub agreement: String,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(rename = "observacion", default)]
    pub notes: Option<String>,
    #[serde(rename = "fecha_sic", default)]
    pub sic_date: Option<String>,
    #[serde(rename = "reg_primer_llamado", default)]
    pub first_call_on: Option<String>,
    #[serde(rename = "reg_segundo_llamado", default)]
    pub second_call_on: Option<String>,
    #[serde(rename = "reg_tercer_llamado", default)]
    pub third_call_on: Option<String>,
    #[serde(rename = "fecha_evaluacion", default)]
    pub evaluation_on: Option<String>,
    #[serde(rename = "fecha_cirugia", default)]
    pub surgery_on: Option<String>,
    #[serde(rename = "control_post_operatorio", default)]
    pub post_op_control_on: Option<String>,
    #[serde(rename = "control_mes", default)]
    pub monthly_control_on: Option<String>,
    #[serde(rename = "motivo_rechazo", default)]
    pub rejection_reason: Option<String>,
    /// RUT of the staff account that registered the record.
    #[serde(rename = "usuario_asodi_ad", default)]
    pub registered_by: Option<String>,
}

impl PatientRecord {
    /// Minimal record, mostly for fixtures and creation flows.
    pub fn new(
        id: i64,
        rut: impl Into<String>,
        agreement: impl Into<String>,
        status: PatientStatus,
        intake_at: Option<String>,
    ) -> Self {
        Self {
            id,
            rut: rut.into(),
            first_name: String::new(),
            last_name: String::new(),
            intake_at,
            status,
            agreement: agreement.into(),
            doctor: None,
            notes: None,
            sic_date: None,
            first_call_on: None,
            second_call_on: None,
            third_call_on: None,
            evaluation_on: None,
            surgery_on: None,
            post_op_control_on: None,
            monthly_control_on: None,
            rejection_reason: None,
            registered_by: None,
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// "Nombre Apellido", trimmed when either part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Payload for registering a new patient record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPatient {
    pub rut: String,
    #[serde(rename = "nombre_paciente")]
    pub first_name: String,
    #[serde(rename = "apellido_paciente")]
    pub last_name: String,
    #[serde(rename = "convenios")]
    pub agreement: String,
    #[serde(rename = "estado_paciente")]
    pub status: PatientStatus,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(rename = "observacion", default)]
    pub notes: Option<String>,
    #[serde(rename = "fecha_sic", default)]
    pub sic_date: Option<String>,
    #[serde(rename = "reg_primer_llamado", default)]
    pub first_call_on: Option<String>,
    #[serde(rename = "usuario_asodi_ad", default)]
    pub registered_by: Option<String>,
}
