//! CLI module
//!
//! Command-line interface over the API clients.
//!
//! # Commands
//!
//! - `search` - Fetch one page of search results
//! - `license-history` - Fetch one page of licensed files
//! - `category` - Show a single category
//! - `category-tree` - List categories under a parent
//! - `query` - Print the query string a search would send

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, SearchArgs};
pub use runner::Runner;
