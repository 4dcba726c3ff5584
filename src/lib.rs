// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Stock API SDK
//!
//! A typed client for a stock media search REST API.
//!
//! ## Features
//!
//! - **Typed requests**: validated builders for search, license history and categories
//! - **Bracketed query strings**: nested request objects flatten to `a[b][c]=v` keys
//! - **Atomic paging**: next, previous and page jumps commit only on success
//! - **Retry and rate limiting**: the HTTP transport backs off on 429 and 5xx
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stock_api::{api::SearchFiles, models::*, StockConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = StockConfig::builder()
//!         .api_key("my-key")
//!         .product("my-app/1.0")
//!         .build()?;
//!
//!     let request = SearchFilesRequest::new()
//!         .with_search_parameters(SearchParameters::new().with_words("tree house")?);
//!
//!     let mut search = SearchFiles::from_config(&config, None, &request)?;
//!     let first = search.fetch_next().await?;
//!     let second = search.fetch_next().await?;
//!     println!("page {} of {}", search.current_page_index(), search.total_pages());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          API Clients                            │
//! │   SearchFiles        LicenseHistory        SearchCategory       │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌────────────┬─────────────────┴─┬───────────────┬───────────────┐
//! │ DeepClone  │ Query             │ Pagination    │ HTTP          │
//! ├────────────┼───────────────────┼───────────────┼───────────────┤
//! │ Snapshots  │ Bracketed keys    │ Session       │ GET/multipart │
//! │ Cycle guard│ Wire coercions    │ Commit        │ Retry         │
//! │            │ Percent encoding  │ Rollback      │ Rate Limit    │
//! └────────────┴───────────────────┴───────────────┴───────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration and endpoints
pub mod config;

/// Independent copies of request graphs
pub mod deep_clone;

/// Query string serialization
pub mod query;

/// JSON response decoding
pub mod decode;

/// HTTP client with retry and rate limiting
pub mod http;

/// Paged navigation with commit and rollback
pub mod pagination;

/// Request and response models
pub mod models;

/// API clients
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use api::{LicenseHistory, SearchCategory, SearchFiles};
pub use config::{Environment, StockConfig};
pub use deep_clone::DeepClone;
pub use pagination::{PaginatedSession, ERROR_SENTINEL};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
