//! Error types used throughout the workspace

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for ASODI
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AsodiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AsodiError {
    /// Message suitable for a user-facing notification banner.
    ///
    /// Data-fetch failures are reported without leaking URLs or payloads.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::Api(_) => "No se pudo conectar con el servidor",
            Self::NotFound(_) => "Registro no encontrado",
            Self::InvalidInput(_) | Self::Validation(_) => "Datos inválidos",
            Self::Config(_) | Self::Internal(_) => "Error interno",
        }
    }
}

/// Result type alias for ASODI operations
pub type Result<T> = std::result::Result<T, AsodiError>;
