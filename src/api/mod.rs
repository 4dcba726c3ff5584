//! API clients
//!
//! - [`SearchFiles`]: paged file search, GET or multipart for image search
//! - [`LicenseHistory`]: paged license history
//! - [`SearchCategory`]: single category and category tree lookups
//!
//! Every client takes an `Arc<dyn Transport>`, so tests and callers can
//! substitute their own transport; `from_config` builds the default
//! [`HttpClient`] from the config's HTTP section.

mod category;
mod fetcher;
mod license_history;
mod search_files;

pub use category::SearchCategory;
pub use fetcher::ApiFetcher;
pub use license_history::{LicenseHistory, DEFAULT_LICENSE_HISTORY_LIMIT};
pub use search_files::{SearchFiles, DEFAULT_SEARCH_FILES_LIMIT};

use crate::config::StockConfig;
use crate::error::Result;
use crate::http::{HttpClient, Transport};
use std::sync::Arc;

/// Build the HTTP transport described by `config`
pub fn build_transport(config: &StockConfig) -> Result<Arc<dyn Transport>> {
    let client = HttpClient::with_config(config.http.to_client_config())?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests;
