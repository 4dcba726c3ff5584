//! Page fetcher bound to one endpoint

use crate::config::StockConfig;
use crate::error::Result;
use crate::http::{ApiHeaders, Transport};
use crate::models::{LicenseHistoryRequest, SearchFilesRequest};
use crate::pagination::PageFetcher;
use crate::query::append_query;
use crate::types::HeaderMap;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Sends rendered requests to one endpoint with the common API headers
#[derive(Clone)]
pub struct ApiFetcher {
    transport: Arc<dyn Transport>,
    config: Arc<StockConfig>,
    endpoint: String,
    access_token: Option<String>,
}

impl ApiFetcher {
    /// Create a fetcher for `endpoint`
    pub fn new(
        transport: Arc<dyn Transport>,
        config: Arc<StockConfig>,
        endpoint: impl Into<String>,
        access_token: Option<&str>,
    ) -> Self {
        Self {
            transport,
            config,
            endpoint: endpoint.into(),
            access_token: access_token.map(str::to_string),
        }
    }

    /// Endpoint URL without query
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Bearer token sent with each call
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub(crate) fn set_access_token(&mut self, token: Option<&str>) {
        self.access_token = token.map(str::to_string);
    }

    fn prepare(&self, query: &str) -> Result<(String, HeaderMap)> {
        let url = append_query(&self.endpoint, query)?;
        let headers = ApiHeaders::build(&self.config, self.access_token.as_deref());
        Ok((url, headers))
    }

    /// GET the endpoint with `query`
    pub async fn get(&self, query: &str) -> Result<String> {
        let (url, headers) = self.prepare(query)?;
        self.transport.get(&url, &headers).await
    }
}

#[async_trait]
impl PageFetcher<SearchFilesRequest> for ApiFetcher {
    async fn fetch(&self, request: &SearchFilesRequest, query: &str) -> Result<String> {
        let by_image = request
            .search_parameters()
            .and_then(|params| params.similar_image())
            .unwrap_or(false);

        match request.similar_image() {
            Some(image) if by_image => {
                let (url, headers) = self.prepare(query)?;
                debug!("Uploading {} byte image for similarity search", image.len());
                self.transport.multipart(&url, image.to_vec(), &headers).await
            }
            _ => self.get(query).await,
        }
    }
}

#[async_trait]
impl PageFetcher<LicenseHistoryRequest> for ApiFetcher {
    async fn fetch(&self, _request: &LicenseHistoryRequest, query: &str) -> Result<String> {
        self.get(query).await
    }
}

impl std::fmt::Debug for ApiFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiFetcher")
            .field("endpoint", &self.endpoint)
            .field("has_token", &self.access_token.is_some())
            .finish_non_exhaustive()
    }
}
