//! API-specific error types
//!
//! Provides error classification for backend operations with retry metadata.

use std::time::Duration;

use asodi_domain::AsodiError;
use thiserror::Error;

/// Categories of API errors for retry logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403, bad credentials) - non-retryable
    Authentication,
    /// Rate limiting errors (429) - retry with backoff
    RateLimit,
    /// Server errors (5xx) - retryable
    Server,
    /// Resource missing (404) - non-retryable
    NotFound,
    /// Client errors (other 4xx) - non-retryable
    Client,
    /// Network/connection errors and timeouts - retryable
    Network,
    /// Response body did not match the expected shape - non-retryable
    Decode,
    /// Configuration errors - non-retryable
    Config,
}

/// Backend operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::NotFound(_) => ApiErrorCategory::NotFound,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Check if this error should be retried
    pub fn should_retry(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network
        )
    }

    /// Get suggested retry delay in seconds
    pub fn retry_delay_secs(&self) -> u64 {
        match self.category() {
            ApiErrorCategory::RateLimit => 60, // Wait for rate limit window
            ApiErrorCategory::Server => 10,    // Moderate delay for server issues
            ApiErrorCategory::Network => 5,    // Quick retry for network
            _ => 0,                            // No retry
        }
    }
}

impl From<AsodiError> for ApiError {
    fn from(err: AsodiError) -> Self {
        match err {
            AsodiError::Network(msg) => Self::Network(msg),
            AsodiError::NotFound(msg) => Self::NotFound(msg),
            AsodiError::Config(msg) => Self::Config(msg),
            AsodiError::Api(msg) => Self::Decode(msg),
            AsodiError::InvalidInput(msg) | AsodiError::Validation(msg) => Self::Client(msg),
            AsodiError::Internal(msg) => Self::Config(msg),
        }
    }
}

impl From<ApiError> for AsodiError {
    fn from(err: ApiError) -> Self {
        let message = err.to_string();
        match err.category() {
            ApiErrorCategory::Network | ApiErrorCategory::Server | ApiErrorCategory::RateLimit => {
                Self::Network(message)
            }
            ApiErrorCategory::NotFound => Self::NotFound(message),
            ApiErrorCategory::Client => Self::InvalidInput(message),
            ApiErrorCategory::Config => Self::Config(message),
            ApiErrorCategory::Authentication | ApiErrorCategory::Decode => Self::Api(message),
        }
    }
}
