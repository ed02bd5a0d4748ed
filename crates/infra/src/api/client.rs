//! REST client for the ASODI backend
//!
//! Thin typed layer over [`HttpClient`]: builds `/asodi/v1` URLs, bounds each
//! call with a timeout and maps HTTP status codes to [`ApiError`] categories.

use std::sync::Arc;
use std::time::Duration;

use asodi_domain::constants::{API_PREFIX, DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS};
use asodi_domain::ApiConfig;
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for [`AsodiClient`]
#[derive(Debug, Clone)]
pub struct AsodiClientConfig {
    /// Backend origin, e.g. `http://localhost:8000`; the API prefix is added.
    pub base_url: String,
    /// Timeout for a single HTTP attempt
    pub timeout: Duration,
    /// Total attempts for idempotent-safe requests
    pub max_attempts: usize,
}

impl Default for AsodiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for AsodiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_attempts: config.max_attempts.max(1),
        }
    }
}

/// Typed client for the ASODI backend
#[derive(Clone)]
pub struct AsodiClient {
    http: Arc<HttpClient>,
    config: AsodiClientConfig,
    api_root: String,
}

impl AsodiClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be built.
    pub fn new(config: AsodiClientConfig) -> Result<Self, ApiError> {
        let api_root = api_root(&config.base_url)?;

        let http = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http: Arc::new(http), config, api_root })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> AsodiClientBuilder {
        AsodiClientBuilder::default()
    }

    /// Root every resource path is appended to (`{base_url}/asodi/v1`).
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn config(&self) -> &AsodiClientConfig {
        &self.config
    }

    /// Execute a GET request
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET request");
        let response = self.dispatch(self.http.request(Method::GET, &url), true).await?;
        Self::decode(response, &url).await
    }

    /// Execute a GET request with query parameters
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "GET request");
        let response = self.dispatch(self.http.request(Method::GET, &url).query(query), true).await?;
        Self::decode(response, &url).await
    }

    /// Execute a POST request with a JSON body
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.send_json(Method::POST, path, body).await
    }

    /// Execute a PUT request with a JSON body
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.send_json(Method::PUT, path, body).await
    }

    /// Execute a PATCH request with a JSON body
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        self.send_json(Method::PATCH, path, body).await
    }

    /// Execute a DELETE request, ignoring any response body
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!(url = %url, "DELETE request");
        let response = self.dispatch(self.http.request(Method::DELETE, &url), true).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status_error(status, &url, body));
        }
        Ok(())
    }

    /// Send a multipart form once (uploads are not retried)
    #[instrument(skip(self, form), fields(path = %path, method = %method))]
    pub async fn send_multipart<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "multipart request");
        let response = self.dispatch(self.http.request(method, &url).multipart(form), false).await?;
        Self::decode(response, &url).await
    }

    async fn send_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let url = self.url(path);
        let body = serde_json::to_vec(body)
            .map_err(|e| ApiError::Client(format!("Failed to serialize body: {e}")))?;
        debug!(url = %url, %method, bytes = body.len(), "JSON request");

        let request = self
            .http
            .request(method, &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        let response = self.dispatch(request, true).await?;
        Self::decode(response, &url).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    /// Budget for a whole call, retries and backoff included.
    fn call_budget(&self) -> Duration {
        let attempts = u32::try_from(self.config.max_attempts.max(1)).unwrap_or(u32::MAX);
        self.config.timeout.saturating_mul(attempts) + Duration::from_secs(1)
    }

    async fn dispatch(&self, request: RequestBuilder, retry: bool) -> Result<Response, ApiError> {
        let budget = self.call_budget();
        let sending = async {
            if retry {
                self.http.send(request).await
            } else {
                self.http.send_once(request).await
            }
        };

        match tokio::time::timeout(budget, sending).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(ApiError::from(err)),
            Err(_) => Err(ApiError::Timeout(budget)),
        }
    }

    async fn decode<R: DeserializeOwned>(response: Response, url: &str) -> Result<R, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response from {url}: {e}")))?;

        if !status.is_success() {
            return Err(Self::map_status_error(status, url, body));
        }

        // 204/205 and empty bodies carry no JSON; only `()`-like types accept them.
        if status == StatusCode::NO_CONTENT
            || status == StatusCode::RESET_CONTENT
            || body.trim().is_empty()
        {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!(
                    "{url} returned no content ({}) but a body was expected",
                    status.as_u16()
                ))
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("Failed to parse response from {url}: {e}")))
    }

    fn map_status_error(status: StatusCode, url: &str, body: String) -> ApiError {
        let message = if body.is_empty() {
            format!("{url} returned status {status}")
        } else {
            format!("{url} returned status {status}: {body}")
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth(message),
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimit(message),
            s if s.is_server_error() => ApiError::Server(message),
            s if s.is_client_error() => ApiError::Client(message),
            _ => ApiError::Network(message),
        }
    }
}

fn api_root(base_url: &str) -> Result<String, ApiError> {
    let parsed = Url::parse(base_url)
        .map_err(|e| ApiError::Config(format!("Invalid API base URL {base_url:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!("API base URL must be http(s): {base_url}")));
    }
    Ok(format!("{}{}", base_url.trim_end_matches('/'), API_PREFIX))
}

/// Builder for [`AsodiClient`]
#[derive(Debug, Default)]
pub struct AsodiClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_attempts: Option<usize>,
}

impl AsodiClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or client creation fails
    pub fn build(self) -> Result<AsodiClient, ApiError> {
        AsodiClient::new(AsodiClientConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            timeout: self.timeout.unwrap_or(Duration::from_secs(DEFAULT_API_TIMEOUT_SECS)),
            max_attempts: self.max_attempts.unwrap_or(1).max(1),
        })
    }
}
