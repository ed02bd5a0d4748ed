//! User account types
//!
//! `AdUser` is a staff account ("usuario-asodi-ad") able to log into the
//! administration front end; `RegistryPerson` is an entry of the people
//! registry used to autocomplete patient names.

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Staff account
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdUser {
    #[serde(rename = "rut_ad")]
    pub rut: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "correo")]
    pub email: String,
    pub password: String,
    #[serde(rename = "estado_ad", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl AdUser {
    /// Case-insensitive e-mail match plus exact password match.
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim()) && self.password == password
    }
}

impl std::fmt::Debug for AdUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdUser")
            .field("rut", &self.rut)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("active", &self.active)
            .finish()
    }
}

/// Entry of the people registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct RegistryPerson {
    pub rut: String,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
}
