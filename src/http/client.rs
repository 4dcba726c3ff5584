//! HTTP client with retry and rate limiting
//!
//! Provides the reqwest-backed [`Transport`] used by the API clients:
//! - Automatic retries with configurable backoff
//! - Rate limiting to prevent API throttling
//! - Status mapping into the crate error taxonomy

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::transport::{Transport, NO_CONTENT_BODY};
use crate::error::{Error, Result};
use crate::types::{BackoffType, HeaderMap, Method};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Body of 5xx errors surfaced to callers
pub const SERVER_ERROR_MESSAGE: &str = "API returned with Server Error";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
            default_headers: HashMap::new(),
            user_agent: format!("stock-api-sdk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Request body variants
#[derive(Debug, Clone)]
enum Payload {
    Empty,
    Bytes { data: Vec<u8>, content_type: String },
    Multipart(Vec<u8>),
}

impl Payload {
    fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Empty => req,
            Self::Bytes { data, content_type } => req
                .header(CONTENT_TYPE, content_type.as_str())
                .body(data.clone()),
            Self::Multipart(data) => {
                let part = Part::bytes(data.clone()).file_name("file");
                req.multipart(Form::new().part("file", part))
            }
        }
    }
}

/// Result of a single round-trip
enum Outcome {
    Done(Result<String>),
    Retry { error: Error, delay: Duration },
}

/// HTTP client with retry and rate limiting
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &HeaderMap,
        payload: Payload,
    ) -> Result<String> {
        if url.trim().is_empty() {
            return Err(Error::validation("URL cannot be empty"));
        }
        url::Url::parse(url)?;

        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let mut req = self.client.request(method.into(), url);
            for (key, value) in &self.config.default_headers {
                req = req.header(key.as_str(), value.as_str());
            }
            for (key, value) in headers {
                req = req.header(key.as_str(), value.as_str());
            }
            req = payload.apply(req).timeout(self.config.timeout);

            debug!(
                "{:?} {} (attempt {}/{})",
                method,
                url,
                attempt + 1,
                max_retries + 1
            );

            let (error, delay) = match self.classify(req.send().await, attempt).await {
                Outcome::Done(result) => return result,
                Outcome::Retry { error, delay } => (error, delay),
            };
            if attempt >= max_retries {
                return Err(error);
            }

            warn!(
                "{}, attempt {}/{}, retrying in {:?}",
                error,
                attempt + 1,
                max_retries + 1,
                delay
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Decide whether one round-trip is final or worth repeating
    async fn classify(
        &self,
        sent: std::result::Result<Response, reqwest::Error>,
        attempt: u32,
    ) -> Outcome {
        let response = match sent {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Outcome::Retry {
                    error: Error::Timeout {
                        timeout_ms: self.config.timeout.as_millis() as u64,
                    },
                    delay: self.calculate_backoff(attempt),
                }
            }
            Err(e) if e.is_connect() => {
                return Outcome::Retry {
                    error: Error::Http(e),
                    delay: self.calculate_backoff(attempt),
                }
            }
            Err(e) => return Outcome::Done(Err(Error::Http(e))),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = extract_retry_after(&response);
            return Outcome::Retry {
                error: Error::RateLimited {
                    retry_after_seconds: retry_after,
                },
                delay: Duration::from_secs(retry_after),
            };
        }
        if is_retryable_status(status.as_u16()) {
            return Outcome::Retry {
                error: Error::http_status(status.as_u16(), SERVER_ERROR_MESSAGE),
                delay: self.calculate_backoff(attempt),
            };
        }

        Outcome::Done(read_body(response).await)
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<String> {
        self.send(Method::GET, url, headers, Payload::Empty).await
    }

    async fn post(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let payload = Payload::Bytes {
            data: body,
            content_type: content_type.to_string(),
        };
        self.send(Method::POST, url, headers, payload).await
    }

    async fn multipart(&self, url: &str, body: Vec<u8>, headers: &HeaderMap) -> Result<String> {
        self.send(Method::POST, url, headers, Payload::Multipart(body))
            .await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Map a final response to its body or an error
async fn read_body(response: Response) -> Result<String> {
    let status = response.status();
    match status.as_u16() {
        204 => Ok(NO_CONTENT_BODY.to_string()),
        200..=299 => Ok(response.text().await?),
        400..=499 => {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Failed to read {} body: {e}", status.as_u16());
                    format!("<unreadable body: {e}>")
                }
            };
            Err(Error::http_status(status.as_u16(), body))
        }
        500..=599 => Err(Error::http_status(status.as_u16(), SERVER_ERROR_MESSAGE)),
        other => Err(Error::http_status(
            other,
            format!("Unexpected response status {status}"),
        )),
    }
}

/// Statuses the client repeats before giving up
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(
        status,
        429 | 500 | 502 | 503 | 504 | 520 | 521 | 522 | 523 | 524
    )
}

/// Extract retry-after header value
fn extract_retry_after(response: &Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .unwrap_or(60)
}
