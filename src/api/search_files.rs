//! Paged search over the files endpoint

use super::fetcher::ApiFetcher;
use super::build_transport;
use crate::config::StockConfig;
use crate::deep_clone::DeepClone;
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::models::{ResultColumn, SearchFilesRequest, SearchFilesResponse};
use crate::pagination::{PaginatedSession, SessionPhase};
use std::sync::Arc;

/// Page size used when the request does not set one
pub const DEFAULT_SEARCH_FILES_LIMIT: u32 = 32;

/// Pages through search results for one request.
///
/// The result count is always requested so that navigation can tell where
/// the last page is. When the caller did not ask for `nb_results` it is
/// removed from every response handed back.
#[derive(Debug)]
pub struct SearchFiles {
    session: PaginatedSession<SearchFilesRequest, ApiFetcher>,
    strip_nb_results: bool,
}

impl SearchFiles {
    /// Create a search over `transport`
    pub fn new(
        config: &StockConfig,
        transport: Arc<dyn Transport>,
        access_token: Option<&str>,
        request: &SearchFilesRequest,
    ) -> Result<Self> {
        config.validate()?;
        validate_request(request, access_token)?;

        let mut working = request.deep_clone()?;
        let strip_nb_results = working.add_result_column(ResultColumn::NbResults);

        let fetcher = ApiFetcher::new(
            transport,
            Arc::new(config.clone()),
            config.endpoints().search_files,
            access_token,
        );
        let session = PaginatedSession::new(&working, fetcher, DEFAULT_SEARCH_FILES_LIMIT)?;

        Ok(Self {
            session,
            strip_nb_results,
        })
    }

    /// Create a search with an HTTP client built from `config`
    pub fn from_config(
        config: &StockConfig,
        access_token: Option<&str>,
        request: &SearchFilesRequest,
    ) -> Result<Self> {
        Self::new(config, build_transport(config)?, access_token, request)
    }

    /// Fetch the following page; the first call fetches the requested offset
    pub async fn fetch_next(&mut self) -> Result<SearchFilesResponse> {
        let response = self.session.fetch_next().await?;
        Ok(self.for_caller(response))
    }

    /// Fetch the preceding page
    pub async fn fetch_previous(&mut self) -> Result<SearchFilesResponse> {
        let response = self.session.fetch_previous().await?;
        Ok(self.for_caller(response))
    }

    /// Fetch the page at zero-based `index`
    pub async fn fetch_page(&mut self, index: i64) -> Result<SearchFilesResponse> {
        let response = self.session.fetch_page(index).await?;
        Ok(self.for_caller(response))
    }

    /// Last successful response
    pub fn last_response(&self) -> Option<SearchFilesResponse> {
        self.session
            .last_response()
            .cloned()
            .map(|response| self.for_caller(response))
    }

    /// Total matching files, or [`ERROR_SENTINEL`](crate::pagination::ERROR_SENTINEL)
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
    pub fn request(&self) -> &SearchFilesRequest {
        self.session.request()
    }

    /// Replace the access token; the request is checked against it first
    pub fn set_access_token(&mut self, access_token: Option<&str>) -> Result<()> {
        validate_request(self.session.request(), access_token)?;
        self.session.fetcher_mut().set_access_token(access_token);
        Ok(())
    }

    fn for_caller(&self, mut response: SearchFilesResponse) -> SearchFilesResponse {
        if self.strip_nb_results {
            response.nb_results = None;
        }
        response
    }
}

/// Check a search request against the token that will accompany it
fn validate_request(request: &SearchFilesRequest, access_token: Option<&str>) -> Result<()> {
    let Some(params) = request.search_parameters() else {
        return Err(Error::validation(
            "Search parameter must be present in the request object",
        ));
    };

    let wants_license_state = request
        .result_columns()
        .is_some_and(|columns| columns.contains(&ResultColumn::IsLicensed));
    if wants_license_state && access_token.is_none() {
        return Err(Error::validation(
            "Access Token missing! Result Column 'is_licensed' requires authentication.",
        ));
    }

    if params.similar_image() == Some(true) && request.similar_image().is_none() {
        return Err(Error::validation(
            "Image Data missing! Search parameter similar_image requires similar_image in query parameters",
        ));
    }

    Ok(())
}
