//! Stateful offset pagination with atomic commit
//!
//! A session owns a private copy of the caller's request. Every navigation
//! call plans the target offset, renders a candidate request, fetches and
//! decodes it, and only then replaces the committed state in one assignment.
//! Any failure along the way leaves the session exactly as it was.
//!
//! A session is not synchronized; navigation takes `&mut self`, so sharing
//! one between tasks requires an external lock.

use super::types::{
    Navigation, PageFetcher, PagedRequest, PagedResponse, SessionPhase, ERROR_SENTINEL,
};
use crate::decode::JsonDecoder;
use crate::error::{Error, Result};
use crate::query::QuerySerializer;
use tracing::{debug, warn};

/// Committed session state
struct Snapshot<Q: PagedRequest> {
    request: Q,
    last_response: Option<Q::Response>,
}

/// Pages through results of one request against one endpoint
pub struct PaginatedSession<Q: PagedRequest, F: PageFetcher<Q>> {
    fetcher: F,
    limit: u32,
    committed: Snapshot<Q>,
    serializer: QuerySerializer,
    decoder: JsonDecoder,
}

impl<Q: PagedRequest, F: PageFetcher<Q>> PaginatedSession<Q, F> {
    /// Bind a session to a copy of `request`.
    ///
    /// A missing limit is set to `default_limit` and a missing offset to 0 on
    /// the session's copy; the caller's request is never touched.
    pub fn new(request: &Q, fetcher: F, default_limit: u32) -> Result<Self> {
        let mut working = request.deep_clone()?;

        let limit = working.page_limit().unwrap_or(default_limit);
        if limit == 0 {
            return Err(Error::validation("limit must be at least 1"));
        }
        working.set_page_limit(limit);
        if working.page_offset().is_none() {
            working.set_page_offset(0);
        }

        Ok(Self {
            fetcher,
            limit,
            committed: Snapshot {
                request: working,
                last_response: None,
            },
            serializer: QuerySerializer::new(),
            decoder: JsonDecoder::new(),
        })
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Fetch the following page; the first call fetches the configured offset
    pub async fn fetch_next(&mut self) -> Result<Q::Response> {
        self.navigate(Navigation::Next).await
    }

    /// Fetch the preceding page
    pub async fn fetch_previous(&mut self) -> Result<Q::Response> {
        self.navigate(Navigation::Previous).await
    }

    /// Fetch the page at zero-based `index`
    pub async fn fetch_page(&mut self, index: i64) -> Result<Q::Response> {
        self.navigate(Navigation::Page(index)).await
    }

    /// Run one navigation step and commit it on success
    pub async fn navigate(&mut self, navigation: Navigation) -> Result<Q::Response> {
        match self.attempt(navigation).await {
            Ok((request, response)) => {
                self.committed = Snapshot {
                    request,
                    last_response: Some(response.clone()),
                };
                debug!(
                    "Committed {:?}: offset {}, page {}, total {}",
                    navigation,
                    self.offset(),
                    self.current_page_index(),
                    self.total_files()
                );
                Ok(response)
            }
            Err(e) => {
                if !e.is_navigation() {
                    warn!(
                        "{:?} failed, keeping page {}: {}",
                        navigation,
                        self.current_page_index(),
                        e
                    );
                }
                Err(e)
            }
        }
    }

    /// Fetch the candidate page without touching the committed state
    async fn attempt(&self, navigation: Navigation) -> Result<(Q, Q::Response)> {
        let offset = self.plan(navigation)?;

        let mut candidate = self.committed.request.deep_clone()?;
        candidate.set_page_offset(offset);

        let query = self.serializer.serialize(&candidate)?;
        debug!("Fetching offset {} ({} byte query)", offset, query.len());

        let body = self.fetcher.fetch(&candidate, &query).await?;
        let response: Q::Response = self.decoder.decode(&body)?;

        Ok((candidate, response))
    }

    /// Target offset for `navigation`, or the navigation error
    fn plan(&self, navigation: Navigation) -> Result<u32> {
        let offset = u64::from(self.offset());
        let limit = u64::from(self.limit);

        match navigation {
            Navigation::Next => {
                let Some(response) = &self.committed.last_response else {
                    return to_offset(offset).ok_or(Error::NoMoreResults);
                };
                let next = offset + limit;
                match response.nb_results() {
                    Some(total) if next < total => to_offset(next).ok_or(Error::NoMoreResults),
                    _ => Err(Error::NoMoreResults),
                }
            }
            Navigation::Previous => {
                if self.committed.last_response.is_none()
                    || self.current_page_index() <= 0
                    || offset < limit
                {
                    return Err(Error::NoMoreResults);
                }
                to_offset(offset - limit).ok_or(Error::NoMoreResults)
            }
            Navigation::Page(index) => {
                let total_pages = self.total_pages();
                let out_of_bounds = Error::PageOutOfBounds { index, total_pages };
                if index < 0 || (total_pages != ERROR_SENTINEL && index >= total_pages) {
                    return Err(out_of_bounds);
                }
                u64::try_from(index)
                    .ok()
                    .and_then(|i| i.checked_mul(limit))
                    .and_then(to_offset)
                    .ok_or(out_of_bounds)
            }
        }
    }

    // ========================================================================
    // Committed state
    // ========================================================================

    /// Last committed response, `None` before the first successful fetch
    pub fn last_response(&self) -> Option<&Q::Response> {
        self.committed.last_response.as_ref()
    }

    /// The session's working copy of the request
    pub fn request(&self) -> &Q {
        &self.committed.request
    }

    /// Page size used by every fetch
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Offset of the committed page
    pub fn offset(&self) -> u32 {
        self.committed.request.page_offset().unwrap_or(0)
    }

    /// Whether a page has been committed
    pub fn phase(&self) -> SessionPhase {
        if self.committed.last_response.is_some() {
            SessionPhase::Ready
        } else {
            SessionPhase::Idle
        }
    }

    /// Total results reported by the last response, or [`ERROR_SENTINEL`]
    pub fn total_files(&self) -> i64 {
        self.committed
            .last_response
            .as_ref()
            .and_then(|response| response.nb_results())
            .map_or(ERROR_SENTINEL, |n| i64::try_from(n).unwrap_or(i64::MAX))
    }

    /// Whole pages available (`total / limit`, rounded down), or
    /// [`ERROR_SENTINEL`]
    pub fn total_pages(&self) -> i64 {
        match self.total_files() {
            ERROR_SENTINEL => ERROR_SENTINEL,
            total => total / i64::from(self.limit),
        }
    }

    /// Zero-based index of the committed page, or [`ERROR_SENTINEL`]
    pub fn current_page_index(&self) -> i64 {
        if self.total_files() == ERROR_SENTINEL {
            return ERROR_SENTINEL;
        }
        i64::from(self.offset().div_ceil(self.limit))
    }

    /// Transport used for fetches
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Mutable access to the transport, e.g. to swap credentials
    pub fn fetcher_mut(&mut self) -> &mut F {
        &mut self.fetcher
    }
}

impl<Q, F> std::fmt::Debug for PaginatedSession<Q, F>
where
    Q: PagedRequest + std::fmt::Debug,
    F: PageFetcher<Q>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedSession")
            .field("request", &self.committed.request)
            .field("limit", &self.limit)
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

fn to_offset(value: u64) -> Option<u32> {
    u32::try_from(value).ok()
}
