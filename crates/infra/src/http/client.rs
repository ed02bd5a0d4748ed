use std::time::Duration;

use asodi_domain::constants::{DEFAULT_API_MAX_ATTEMPTS, DEFAULT_API_TIMEOUT_SECS};
use asodi_domain::{ApiConfig, AsodiError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// HTTP client with built-in retry and timeout support.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, AsodiError> {
        Self::builder().build()
    }

    /// Client configured from the `api` section of the config.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AsodiError> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .max_attempts(config.max_attempts)
            .build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder with retry semantics.
    ///
    /// Connection failures, timeouts and 5xx responses are retried with
    /// exponential backoff; the last 5xx response is returned as-is.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, AsodiError> {
        let attempts = self.max_attempts.max(1);

        for attempt in 0..attempts {
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                AsodiError::Internal(
                    "request body cannot be cloned; use send_once for streaming bodies".into(),
                )
            })?;

            let request = cloned_builder.build().map_err(|err| AsodiError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let url = request.url().clone();
            debug!(attempt = attempt + 1, %method, %url, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt = attempt + 1, %method, %url, %status, "received HTTP response");

                    if status.is_server_error() && attempt + 1 < attempts {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    debug!(attempt = attempt + 1, %method, %url, error = %err, "HTTP request failed");

                    if attempt + 1 < attempts && should_retry_error(&err) {
                        self.sleep_with_backoff(attempt + 1).await;
                        continue;
                    }

                    return Err(AsodiError::from(InfraError::from(err)));
                }
            }
        }

        Err(AsodiError::Internal("http client exhausted retries without producing a result".into()))
    }

    /// Execute a request exactly once.
    ///
    /// Multipart uploads stream their body and cannot be replayed.
    pub async fn send_once(&self, builder: RequestBuilder) -> Result<Response, AsodiError> {
        let request = builder.build().map_err(|err| AsodiError::from(InfraError::from(err)))?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending single-shot HTTP request");

        self.client.execute(request).await.map_err(|err| {
            debug!(%method, %url, error = %err, "HTTP request failed");
            AsodiError::from(InfraError::from(err))
        })
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << shift)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            max_attempts: DEFAULT_API_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, AsodiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let agent = self
            .user_agent
            .unwrap_or_else(|| format!("asodi-triage/{}", env!("CARGO_PKG_VERSION")));

        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .no_proxy()
            .user_agent(agent)
            .default_headers(headers)
            .build()
            .map_err(|err| AsodiError::from(InfraError::from(err)))?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}

fn should_retry_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}
