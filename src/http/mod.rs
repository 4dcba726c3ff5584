//! HTTP module
//!
//! The [`Transport`] trait is the seam between the API clients and the
//! network; [`HttpClient`] is its reqwest implementation.
//!
//! # Features
//!
//! - **Automatic Retries**: 5xx, timeouts and connect failures with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Common Headers**: API key, product and request id via [`ApiHeaders`]

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, SERVER_ERROR_MESSAGE};
pub(crate) use client::is_retryable_status;
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{
    ApiHeaders, Transport, AUTHORIZATION, NO_CONTENT_BODY, X_API_KEY, X_PRODUCT,
    X_PRODUCT_LOCATION, X_REQUEST_ID,
};

#[cfg(test)]
mod tests;
