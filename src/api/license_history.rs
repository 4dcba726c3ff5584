//! Paged license history of the signed-in member

use super::build_transport;
use super::fetcher::ApiFetcher;
use crate::config::StockConfig;
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::models::{LicenseHistoryRequest, LicenseHistoryResponse};
use crate::pagination::{PaginatedSession, SessionPhase};
use std::sync::Arc;

/// Page size used when the request does not set one
pub const DEFAULT_LICENSE_HISTORY_LIMIT: u32 = 100;

/// Pages through the files a member has licensed
#[derive(Debug)]
pub struct LicenseHistory {
    session: PaginatedSession<LicenseHistoryRequest, ApiFetcher>,
}

impl LicenseHistory {
    /// Create a license history session over `transport`
    pub fn new(
        config: &StockConfig,
        transport: Arc<dyn Transport>,
        access_token: Option<&str>,
        request: &LicenseHistoryRequest,
    ) -> Result<Self> {
        config.validate()?;
        if request.search_parameters().is_none() {
            return Err(Error::validation(
                "Search parameter must be present in the request object",
            ));
        }

        let fetcher = ApiFetcher::new(
            transport,
            Arc::new(config.clone()),
            config.endpoints().license_history,
            access_token,
        );

        Ok(Self {
            session: PaginatedSession::new(request, fetcher, DEFAULT_LICENSE_HISTORY_LIMIT)?,
        })
    }

    /// Create a session with an HTTP client built from `config`
    pub fn from_config(
        config: &StockConfig,
        access_token: Option<&str>,
        request: &LicenseHistoryRequest,
    ) -> Result<Self> {
        Self::new(config, build_transport(config)?, access_token, request)
    }

    /// Fetch the following page; the first call fetches the requested offset
    pub async fn fetch_next(&mut self) -> Result<LicenseHistoryResponse> {
        self.session.fetch_next().await
    }

    /// Fetch the preceding page
    pub async fn fetch_previous(&mut self) -> Result<LicenseHistoryResponse> {
        self.session.fetch_previous().await
    }

    /// Fetch the page at zero-based `index`
    pub async fn fetch_page(&mut self, index: i64) -> Result<LicenseHistoryResponse> {
        self.session.fetch_page(index).await
    }

    /// Last successful response
    pub fn last_response(&self) -> Option<LicenseHistoryResponse> {
        self.session.last_response().cloned()
    }

    /// Total licensed files, or [`ERROR_SENTINEL`](crate::pagination::ERROR_SENTINEL)
    pub fn total_files(&self) -> i64 {
        self.session.total_files()
    }

    /// Whole pages available, or [`ERROR_SENTINEL`](crate::pagination::ERROR_SENTINEL)
    pub fn total_pages(&self) -> i64 {
        self.session.total_pages()
    }

    /// Index of the current page, or [`ERROR_SENTINEL`](crate::pagination::ERROR_SENTINEL)
    pub fn current_page_index(&self) -> i64 {
        self.session.current_page_index()
    }

    /// Whether a page has been fetched
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// The request as it will be sent, including defaults
    pub fn request(&self) -> &LicenseHistoryRequest {
        self.session.request()
    }

    /// Replace the access token used for later fetches
    pub fn set_access_token(&mut self, access_token: Option<&str>) {
        self.session.fetcher_mut().set_access_token(access_token);
    }
}
