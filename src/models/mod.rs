//! Request and response models
//!
//! Requests keep their fields private and validate on every fallible
//! `with_*` call, so an invalid value never reaches a session. Each request
//! type describes its query fields in a static table consumed by the
//! [`QuerySerializer`](crate::query::QuerySerializer).
//!
//! Responses are plain serde structs; unknown keys are ignored.

mod category;
mod enums;
mod license_history;
mod search;

pub use category::{SearchCategoryRequest, StockFileCategory};
pub use enums::{
    Asset3DType, AssetAge, AssetHasReleases, AssetLicenseState, AssetOrientation,
    AssetPremiumCategory, AssetPremiumLevel, AssetTemplateCategory, AssetTemplateType,
    AssetThumbSize, AssetType, AssetVideoDuration, AssetsOrder, LicenseHistoryResultColumn,
    LicenseHistoryThumbnailSize, ResultColumn,
};
pub use license_history::{
    LicenseHistoryRequest, LicenseHistoryResponse, SearchParametersLicenseHistory,
    StockLicenseHistoryFile,
};
pub use search::{
    SearchFilesRequest, SearchFilesResponse, SearchParameters, StockFile, StockFileKeyword,
    MAX_SEARCH_LIMIT,
};

use crate::error::{Error, Result};

/// Reject ids that are not strictly positive
fn positive_id(field: &str, id: u64) -> Result<u64> {
    if id == 0 {
        return Err(Error::validation(format!("{field} must be greater than zero")));
    }
    Ok(id)
}

/// Reject empty or whitespace-only strings
fn non_blank(field: &str, value: impl Into<String>) -> Result<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} can't be empty")));
    }
    Ok(value)
}

/// Keep the first occurrence of every element
fn dedup_preserving_order<T: PartialEq + Copy>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
