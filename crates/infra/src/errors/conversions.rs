//! Conversions from external infrastructure errors into domain errors.

use asodi_domain::AsodiError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub AsodiError);

impl From<InfraError> for AsodiError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<AsodiError> for InfraError {
    fn from(value: AsodiError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoAsodiError {
    fn into_asodi(self) -> AsodiError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → AsodiError */
/* -------------------------------------------------------------------------- */

impl IntoAsodiError for HttpError {
    fn into_asodi(self) -> AsodiError {
        if self.is_timeout() {
            return AsodiError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return AsodiError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return AsodiError::Api(format!("HTTP response could not be decoded: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                404 => AsodiError::NotFound(message),
                400..=499 => AsodiError::InvalidInput(message),
                _ => AsodiError::Network(message),
            };
        }

        AsodiError::Network(format!("HTTP error: {self}"))
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_asodi())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → AsodiError */
/* -------------------------------------------------------------------------- */

impl IntoAsodiError for JsonError {
    fn into_asodi(self) -> AsodiError {
        if self.is_io() {
            AsodiError::Internal(format!("JSON I/O failure: {self}"))
        } else {
            AsodiError::Api(format!("unexpected JSON payload: {self}"))
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_asodi())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → AsodiError */
/* -------------------------------------------------------------------------- */

impl IntoAsodiError for UrlError {
    fn into_asodi(self) -> AsodiError {
        AsodiError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_asodi())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
