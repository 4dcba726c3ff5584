//! Error types for the Stock API SDK
//!
//! This module defines the error hierarchy for the entire SDK.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::http::is_retryable_status;
use thiserror::Error;

/// The main error type for the SDK
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Caller Input Errors
    // ============================================================================
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Request Graph Errors
    // ============================================================================
    #[error("Cannot serialize field '{field}': {message}")]
    Serialization { field: String, message: String },

    #[error("Cannot clone field '{field}': {message}")]
    Clone { field: String, message: String },

    #[error("Cyclic or too deeply nested request graph at '{path}'")]
    CyclicGraph { path: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Decoding Errors
    // ============================================================================
    #[error("Could not parse the given json string: {message}")]
    Parse { message: String },

    #[error("Could not map the given json string to response object: {message}")]
    SchemaMapping { message: String },

    // ============================================================================
    // Navigation Errors
    // ============================================================================
    #[error("No more results available")]
    NoMoreResults,

    #[error("Page index {index} out of bounds (total pages: {total_pages})")]
    PageOutOfBounds { index: i64, total_pages: i64 },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error for a field
    pub fn serialization(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a clone error for a field
    pub fn clone_failed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Clone {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a cyclic graph error
    pub fn cyclic(path: impl Into<String>) -> Self {
        Self::CyclicGraph { path: path.into() }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a schema mapping error
    pub fn schema_mapping(message: impl Into<String>) -> Self {
        Self::SchemaMapping {
            message: message.into(),
        }
    }

    /// Error code reported by the API, or `-1` when the failure did not
    /// come from an HTTP status
    pub fn code(&self) -> i32 {
        match self {
            Error::HttpStatus { status, .. } => i32::from(*status),
            _ => -1,
        }
    }

    /// Check if the HTTP client would repeat the call that produced this error
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if this error came from the network round-trip.
    ///
    /// A session that fails with one of these keeps its previous state, so
    /// repeating the same call is valid.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::HttpStatus { .. }
                | Error::RateLimited { .. }
                | Error::Timeout { .. }
        )
    }

    /// Check if this error is a navigation boundary error
    pub fn is_navigation(&self) -> bool {
        matches!(self, Error::NoMoreResults | Error::PageOutOfBounds { .. })
    }
}

/// Result type alias for the SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
