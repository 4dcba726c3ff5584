//! Pagination types and traits
//!
//! Defines the request/response hooks a [`PaginatedSession`] needs and the
//! transport seam it fetches through.
//!
//! [`PaginatedSession`]: super::PaginatedSession

use crate::deep_clone::DeepClone;
use crate::error::Result;
use crate::query::QueryParams;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Reported by the session accessors when no count is available
pub const ERROR_SENTINEL: i64 = -1;

/// A request that can be paged by offset
pub trait PagedRequest: DeepClone + QueryParams + Send + Sync {
    /// Decoded response type
    type Response: PagedResponse;

    /// Page size set on the request
    fn page_limit(&self) -> Option<u32>;

    /// Offset set on the request
    fn page_offset(&self) -> Option<u32>;

    /// Overwrite the page size
    fn set_page_limit(&mut self, limit: u32);

    /// Overwrite the offset
    fn set_page_offset(&mut self, offset: u32);
}

/// A decoded page
pub trait PagedResponse: DeserializeOwned + Clone + Send + Sync {
    /// Total number of results across all pages, when the payload carries it
    fn nb_results(&self) -> Option<u64>;
}

/// Sends one page request and returns the raw body
#[async_trait]
pub trait PageFetcher<Q: PagedRequest>: Send + Sync {
    /// Fetch the page described by `request`, already rendered as `query`
    async fn fetch(&self, request: &Q, query: &str) -> Result<String>;
}

/// Requested movement through the result pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Following page, or the configured offset on the first call
    Next,
    /// Preceding page
    Previous,
    /// Zero-based page index
    Page(i64),
}

/// Observable state of a session between calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No page has been fetched successfully yet
    Idle,
    /// The last committed fetch succeeded
    Ready,
}
