//! Transport abstraction and common API headers

use crate::config::StockConfig;
use crate::error::Result;
use crate::types::HeaderMap;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// `x-api-key` header
pub const X_API_KEY: &str = "x-api-key";
/// `x-product` header
pub const X_PRODUCT: &str = "x-product";
/// `x-product-location` header
pub const X_PRODUCT_LOCATION: &str = "x-product-location";
/// `x-request-id` header
pub const X_REQUEST_ID: &str = "x-request-id";
/// `Authorization` header
pub const AUTHORIZATION: &str = "Authorization";

/// Body returned for `204 No Content`
pub const NO_CONTENT_BODY: &str = "204";

/// Moves request bytes to the API and returns the response body.
///
/// Implementations map non-success statuses to errors; callers only ever see
/// a body on success.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url`
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<String>;

    /// POST raw `body` with the given content type
    async fn post(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String>;

    /// POST `body` as a multipart form with a single `file` part
    async fn multipart(&self, url: &str, body: Vec<u8>, headers: &HeaderMap) -> Result<String>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str, headers: &HeaderMap) -> Result<String> {
        (**self).get(url, headers).await
    }

    async fn post(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        (**self).post(url, headers, body, content_type).await
    }

    async fn multipart(&self, url: &str, body: Vec<u8>, headers: &HeaderMap) -> Result<String> {
        (**self).multipart(url, body, headers).await
    }
}

/// Builds the headers every API call carries
#[derive(Debug, Clone, Copy)]
pub struct ApiHeaders;

impl ApiHeaders {
    /// Common headers for `config`, with a bearer token when one is given.
    ///
    /// A fresh `x-request-id` is generated on every call.
    pub fn build(config: &StockConfig, access_token: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(X_API_KEY.to_string(), config.api_key.clone());
        headers.insert(X_PRODUCT.to_string(), config.product.clone());
        if let Some(location) = &config.product_location {
            headers.insert(X_PRODUCT_LOCATION.to_string(), location.clone());
        }
        if let Some(token) = access_token {
            headers.insert(AUTHORIZATION.to_string(), format!("Bearer {token}"));
        }
        headers.insert(X_REQUEST_ID.to_string(), Uuid::new_v4().to_string());
        headers
    }
}
