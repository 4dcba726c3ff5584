//! CLI commands and argument parsing

use crate::models::{AssetOrientation, AssetsOrder, ResultColumn};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Search and browse a stock media library from the command line
#[derive(Parser, Debug)]
#[command(name = "stock-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML); STOCK_* environment variables are used when absent
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Access token for member APIs and license state columns
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search files
    Search(SearchArgs),

    /// List files licensed by the signed-in member
    LicenseHistory {
        /// Entries per page
        #[arg(short, long)]
        limit: Option<u32>,

        /// Zero-based page to fetch
        #[arg(short, long)]
        page: Option<i64>,

        /// Response language, e.g. en_US
        #[arg(long)]
        locale: Option<String>,
    },

    /// Show one category
    Category {
        /// Category id
        #[arg(long)]
        id: u64,

        /// Response language, e.g. en_US
        #[arg(long)]
        locale: Option<String>,
    },

    /// Show the children of a category, or the top level
    CategoryTree {
        /// Parent category id
        #[arg(long)]
        id: Option<u64>,

        /// Response language, e.g. en_US
        #[arg(long)]
        locale: Option<String>,
    },

    /// Print the query string a search would send, without calling the API
    Query(SearchArgs),
}

/// Search filters shared by `search` and `query`
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Keywords
    #[arg(short, long)]
    pub words: Option<String>,

    /// Response language, e.g. en_US
    #[arg(long)]
    pub locale: Option<String>,

    /// Results per page (1-64)
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// Results to skip before the first page
    #[arg(long)]
    pub offset: Option<u32>,

    /// Zero-based page to fetch
    #[arg(short, long)]
    pub page: Option<i64>,

    /// Sort order (relevance, creation, popularity, nb_downloads, undiscovered)
    #[arg(long)]
    pub order: Option<AssetsOrder>,

    /// Orientation (horizontal, vertical, square, all)
    #[arg(long)]
    pub orientation: Option<AssetOrientation>,

    /// Only files by this creator
    #[arg(long)]
    pub creator_id: Option<u64>,

    /// Only files in this category
    #[arg(long)]
    pub category: Option<u64>,

    /// Files similar to this media id
    #[arg(long)]
    pub similar: Option<u64>,

    /// Only photos
    #[arg(long)]
    pub photos: bool,

    /// Only vectors
    #[arg(long)]
    pub vectors: bool,

    /// Only videos
    #[arg(long)]
    pub videos: bool,

    /// Include offensive content
    #[arg(long)]
    pub offensive: bool,

    /// Columns to return, comma separated
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<ResultColumn>,

    /// Image file to search by similarity
    #[arg(long)]
    pub image: Option<PathBuf>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one document per line
    Json,
    /// Indented JSON
    Pretty,
}
