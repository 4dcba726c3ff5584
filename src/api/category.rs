//! Category lookups

use super::build_transport;
use crate::config::{Endpoints, StockConfig};
use crate::decode::JsonDecoder;
use crate::error::{Error, Result};
use crate::http::{ApiHeaders, Transport};
use crate::models::{SearchCategoryRequest, StockFileCategory};
use crate::query::{append_query, to_query_string};
use std::sync::Arc;
use tracing::debug;

/// Looks up single categories and the category tree
pub struct SearchCategory {
    transport: Arc<dyn Transport>,
    config: StockConfig,
    endpoints: Endpoints,
    decoder: JsonDecoder,
}

impl SearchCategory {
    /// Create a category client over `transport`
    pub fn new(config: &StockConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            transport,
            endpoints: config.endpoints(),
            config: config.clone(),
            decoder: JsonDecoder::new(),
        })
    }

    /// Create a category client with an HTTP client built from `config`
    pub fn from_config(config: &StockConfig) -> Result<Self> {
        Self::new(config, build_transport(config)?)
    }

    /// Fetch one category; `category_id` is required
    pub async fn get_category(&self, request: &SearchCategoryRequest) -> Result<StockFileCategory> {
        if request.category_id().is_none() {
            return Err(Error::validation(
                "Category id must be present in the search request",
            ));
        }
        let body = self.get(&self.endpoints.search_category, request).await?;
        self.decoder.decode(&body)
    }

    /// Fetch the children of a category, or the top level without an id
    pub async fn get_category_tree(
        &self,
        request: &SearchCategoryRequest,
    ) -> Result<Vec<StockFileCategory>> {
        let body = self
            .get(&self.endpoints.search_category_tree, request)
            .await?;
        self.decoder.decode(&body)
    }

    async fn get(&self, endpoint: &str, request: &SearchCategoryRequest) -> Result<String> {
        let url = append_query(endpoint, &to_query_string(request)?)?;
        debug!("Category lookup {}", url);
        let headers = ApiHeaders::build(&self.config, None);
        self.transport.get(&url, &headers).await
    }
}

impl std::fmt::Debug for SearchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCategory")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}
