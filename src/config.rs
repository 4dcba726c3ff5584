//! SDK configuration
//!
//! Holds the API credentials, the target environment and the HTTP settings
//! shared by every API client. Configuration can be built in code, read from
//! `STOCK_*` environment variables or loaded from YAML.

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use strum::{Display, EnumString};

/// Production API host
pub const PROD_HOST: &str = "https://stock.adobe.io";

/// Staging API host
pub const STAGE_HOST: &str = "https://stock-stage.adobe.io";

/// Environment variable names read by [`StockConfig::from_env`]
pub mod env_vars {
    pub const API_KEY: &str = "STOCK_API_KEY";
    pub const PRODUCT: &str = "STOCK_PRODUCT";
    pub const PRODUCT_LOCATION: &str = "STOCK_PRODUCT_LOCATION";
    pub const ENVIRONMENT: &str = "STOCK_ENVIRONMENT";
    pub const BASE_URL: &str = "STOCK_BASE_URL";
}

// ============================================================================
// Environment & Endpoints
// ============================================================================

/// Target API environment
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    /// Production
    #[strum(to_string = "prod", serialize = "production")]
    Prod,
    /// Staging
    #[default]
    #[strum(to_string = "stage", serialize = "staging")]
    Stage,
}

impl Environment {
    /// API host for this environment
    pub fn host(self) -> &'static str {
        match self {
            Self::Prod => PROD_HOST,
            Self::Stage => STAGE_HOST,
        }
    }
}

/// Resolved endpoint URLs for every API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Search/Files
    pub search_files: String,
    /// Search/Category
    pub search_category: String,
    /// Search/CategoryTree
    pub search_category_tree: String,
    /// Member/LicenseHistory
    pub license_history: String,
}

impl Endpoints {
    /// Endpoints of the given environment
    pub fn resolve(environment: Environment) -> Self {
        Self::with_host(environment.host())
    }

    /// Endpoints rooted at an arbitrary host
    pub fn with_host(host: &str) -> Self {
        let host = host.trim_end_matches('/');
        Self {
            search_files: format!("{host}/Rest/Media/1/Search/Files"),
            search_category: format!("{host}/Rest/Media/1/Search/Category"),
            search_category_tree: format!("{host}/Rest/Media/1/Search/CategoryTree"),
            license_history: format!("{host}/Rest/Libraries/1/Member/LicenseHistory"),
        }
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP settings as they appear in YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Rate limiting; `None` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimitConfig>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_rate_limit() -> Option<RateLimitConfig> {
    Some(RateLimitConfig::default())
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

/// Rate limiting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second limit
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Burst size
    #[serde(default = "default_rps")]
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_rps(),
            burst_size: default_rps(),
        }
    }
}

fn default_rps() -> u32 {
    10
}

impl HttpConfig {
    /// Convert into the HTTP client's runtime config
    pub fn to_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .backoff(
                self.retry_backoff.backoff_type,
                Duration::from_millis(self.retry_backoff.initial_ms),
                Duration::from_millis(self.retry_backoff.max_ms),
            );
        builder = match &self.rate_limit {
            Some(limit) => builder.rate_limit(RateLimiterConfig::new(
                limit.requests_per_second,
                limit.burst_size,
            )),
            None => builder.no_rate_limit(),
        };
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}

// ============================================================================
// Stock Config
// ============================================================================

/// Credentials and environment shared by the API clients
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct StockConfig {
    /// API key sent as `x-api-key`
    pub api_key: String,

    /// Product name sent as `x-product`
    pub product: String,

    /// Product location sent as `x-product-location`
    #[serde(default)]
    pub product_location: Option<String>,

    /// Target environment
    #[serde(default)]
    pub environment: Environment,

    /// Replaces the environment host, e.g. for a local mock server
    #[serde(default)]
    pub base_url_override: Option<String>,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl std::fmt::Debug for StockConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockConfig")
            .field("api_key", &"***")
            .field("product", &self.product)
            .field("product_location", &self.product_location)
            .field("environment", &self.environment)
            .field("base_url_override", &self.base_url_override)
            .field("http", &self.http)
            .finish()
    }
}

impl StockConfig {
    /// Create a new config builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Read the config from `STOCK_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the config through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(key) = lookup(env_vars::API_KEY) {
            builder = builder.api_key(key);
        }
        if let Some(product) = lookup(env_vars::PRODUCT) {
            builder = builder.product(product);
        }
        if let Some(location) = lookup(env_vars::PRODUCT_LOCATION).none_if_blank() {
            builder = builder.product_location(location);
        }
        if let Some(env) = lookup(env_vars::ENVIRONMENT).none_if_blank() {
            let environment = env.trim().parse::<Environment>().map_err(|_| {
                Error::config(format!(
                    "{} must be 'prod' or 'stage', got '{env}'",
                    env_vars::ENVIRONMENT
                ))
            })?;
            builder = builder.environment(environment);
        }
        if let Some(url) = lookup(env_vars::BASE_URL).none_if_blank() {
            builder = builder.base_url_override(url);
        }
        builder.build()
    }

    /// Parse the config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::config("api_key is required"));
        }
        if self.product.trim().is_empty() {
            return Err(Error::config("product is required"));
        }
        if let Some(url) = &self.base_url_override {
            url::Url::parse(url)
                .map_err(|e| Error::config(format!("Invalid base_url_override '{url}': {e}")))?;
        }
        Ok(())
    }

    /// Endpoint URLs for this config
    pub fn endpoints(&self) -> Endpoints {
        match &self.base_url_override {
            Some(host) => Endpoints::with_host(host),
            None => Endpoints::resolve(self.environment),
        }
    }
}

/// Builder for [`StockConfig`]
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    api_key: Option<String>,
    product: Option<String>,
    product_location: Option<String>,
    environment: Environment,
    base_url_override: Option<String>,
    http: HttpConfig,
}

impl StockConfigBuilder {
    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the product name
    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Set the product location
    pub fn product_location(mut self, location: impl Into<String>) -> Self {
        self.product_location = Some(location.into());
        self
    }

    /// Set the environment
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Replace the environment host
    pub fn base_url_override(mut self, url: impl Into<String>) -> Self {
        self.base_url_override = Some(url.into());
        self
    }

    /// Set the HTTP settings
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<StockConfig> {
        let config = StockConfig {
            api_key: self.api_key.unwrap_or_default(),
            product: self.product.unwrap_or_default(),
            product_location: self.product_location,
            environment: self.environment,
            base_url_override: self.base_url_override,
            http: self.http,
        };
        config.validate()?;
        Ok(config)
    }
}
