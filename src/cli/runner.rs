//! CLI command runner

use super::commands::{Cli, Commands, OutputFormat, SearchArgs};
use crate::api::{LicenseHistory, SearchCategory, SearchFiles};
use crate::config::StockConfig;
use crate::decode::{encode, encode_pretty};
use crate::error::Result;
use crate::models::{
    LicenseHistoryRequest, SearchCategoryRequest, SearchFilesRequest, SearchParameters,
    SearchParametersLicenseHistory,
};
use crate::query::to_query_string;
use serde::Serialize;
use tracing::{debug, info};

/// One fetched page together with where it sits in the result set
#[derive(Debug, Serialize)]
struct PageOutput<'a, T> {
    page: i64,
    total_pages: i64,
    total_files: i64,
    response: &'a T,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Search(args) => self.search(args).await,
            Commands::LicenseHistory {
                limit,
                page,
                locale,
            } => self.license_history(*limit, *page, locale.as_deref()).await,
            Commands::Category { id, locale } => self.category(*id, locale.as_deref()).await,
            Commands::CategoryTree { id, locale } => {
                self.category_tree(*id, locale.as_deref()).await
            }
            Commands::Query(args) => self.query(args),
        }
    }

    fn load_config(&self) -> Result<StockConfig> {
        match &self.cli.config {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                StockConfig::from_yaml_file(path)
            }
            None => StockConfig::from_env(),
        }
    }

    async fn search(&self, args: &SearchArgs) -> Result<()> {
        let config = self.load_config()?;
        let request = build_search_request(args)?;
        let mut search = SearchFiles::from_config(&config, self.cli.token.as_deref(), &request)?;

        let response = match args.page {
            Some(index) => search.fetch_page(index).await?,
            None => search.fetch_next().await?,
        };
        info!(
            "Page {} of {} ({} files)",
            search.current_page_index(),
            search.total_pages(),
            search.total_files()
        );

        self.output_message(&PageOutput {
            page: search.current_page_index(),
            total_pages: search.total_pages(),
            total_files: search.total_files(),
            response: &response,
        })
    }

    async fn license_history(
        &self,
        limit: Option<u32>,
        page: Option<i64>,
        locale: Option<&str>,
    ) -> Result<()> {
        let config = self.load_config()?;

        let mut params = SearchParametersLicenseHistory::new();
        if let Some(limit) = limit {
            params = params.with_limit(limit)?;
        }
        let mut request = LicenseHistoryRequest::new().with_search_parameters(params);
        if let Some(locale) = locale {
            request = request.with_locale(locale)?;
        }

        let mut history =
            LicenseHistory::from_config(&config, self.cli.token.as_deref(), &request)?;
        let response = match page {
            Some(index) => history.fetch_page(index).await?,
            None => history.fetch_next().await?,
        };

        self.output_message(&PageOutput {
            page: history.current_page_index(),
            total_pages: history.total_pages(),
            total_files: history.total_files(),
            response: &response,
        })
    }

    async fn category(&self, id: u64, locale: Option<&str>) -> Result<()> {
        let config = self.load_config()?;
        let request = category_request(Some(id), locale)?;
        let category = SearchCategory::from_config(&config)?
            .get_category(&request)
            .await?;
        self.output_message(&category)
    }

    async fn category_tree(&self, id: Option<u64>, locale: Option<&str>) -> Result<()> {
        let config = self.load_config()?;
        let request = category_request(id, locale)?;
        let categories = SearchCategory::from_config(&config)?
            .get_category_tree(&request)
            .await?;
        info!("Found {} categories", categories.len());
        self.output_message(&categories)
    }

    fn query(&self, args: &SearchArgs) -> Result<()> {
        let request = build_search_request(args)?;
        println!("{}", to_query_string(&request)?);
        Ok(())
    }

    /// Output a message in the configured format
    fn output_message<T: Serialize>(&self, msg: &T) -> Result<()> {
        let output = match self.cli.format {
            OutputFormat::Json => encode(msg)?,
            OutputFormat::Pretty => encode_pretty(msg)?,
        };
        println!("{output}");
        Ok(())
    }
}

fn category_request(id: Option<u64>, locale: Option<&str>) -> Result<SearchCategoryRequest> {
    let mut request = SearchCategoryRequest::new();
    if let Some(id) = id {
        request = request.with_category_id(id)?;
    }
    if let Some(locale) = locale {
        request = request.with_locale(locale)?;
    }
    Ok(request)
}

/// Translate search flags into a request
pub(crate) fn build_search_request(args: &SearchArgs) -> Result<SearchFilesRequest> {
    let mut params = SearchParameters::new();

    if let Some(words) = &args.words {
        params = params.with_words(words.as_str())?;
    }
    if let Some(limit) = args.limit {
        params = params.with_limit(limit)?;
    }
    if let Some(offset) = args.offset {
        params = params.with_offset(offset);
    }
    if let Some(order) = args.order {
        params = params.with_order(order);
    }
    if let Some(orientation) = args.orientation {
        params = params.with_filter_orientation(orientation);
    }
    if let Some(id) = args.creator_id {
        params = params.with_creator_id(id)?;
    }
    if let Some(id) = args.category {
        params = params.with_category(id)?;
    }
    if let Some(id) = args.similar {
        params = params.with_similar(id)?;
    }
    if args.photos {
        params = params.with_filter_content_type_photo(true);
    }
    if args.vectors {
        params = params.with_filter_content_type_vector(true);
    }
    if args.videos {
        params = params.with_filter_content_type_video(true);
    }
    if args.offensive {
        params = params.with_filter_offensive_2(true);
    }

    let image = match &args.image {
        Some(path) => {
            params = params.with_similar_image(true);
            Some(std::fs::read(path)?)
        }
        None => None,
    };

    let mut request = SearchFilesRequest::new().with_search_parameters(params);
    if let Some(locale) = &args.locale {
        request = request.with_locale(locale.as_str())?;
    }
    if !args.columns.is_empty() {
        request = request.with_result_columns(args.columns.iter().copied());
    }
    if let Some(image) = image {
        request = request.with_similar_image(image)?;
    }

    Ok(request)
}
