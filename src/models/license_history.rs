//! License history request and response

use super::enums::{AssetType, LicenseHistoryResultColumn, LicenseHistoryThumbnailSize};
use super::{dedup_preserving_order, non_blank};
use crate::error::{Error, Result};
use crate::pagination::{PagedRequest, PagedResponse};
use crate::query::{FieldMeta, ParamValue, QueryParams};
use serde::{Deserialize, Serialize};

/// Paging and thumbnail size for a license history call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParametersLicenseHistory {
    limit: Option<u32>,
    offset: Option<u32>,
    thumbnail_size: Option<LicenseHistoryThumbnailSize>,
}

crate::deep_clone_struct!(SearchParametersLicenseHistory {
    limit,
    offset,
    thumbnail_size,
});

impl SearchParametersLicenseHistory {
    /// Empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Page size, at least 1
    pub fn with_limit(mut self, limit: u32) -> Result<Self> {
        if limit < 1 {
            return Err(Error::validation("limit must be at least 1"));
        }
        self.limit = Some(limit);
        Ok(self)
    }

    /// Number of entries to skip
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Thumbnail size of returned entries
    pub fn with_thumbnail_size(mut self, size: LicenseHistoryThumbnailSize) -> Self {
        self.thumbnail_size = Some(size);
        self
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn offset(&self) -> Option<u32> {
        self.offset
    }

    pub fn thumbnail_size(&self) -> Option<LicenseHistoryThumbnailSize> {
        self.thumbnail_size
    }
}

static LICENSE_HISTORY_PARAMETER_FIELDS: &[FieldMeta] = &[
    FieldMeta::identity("limit", &["limit"]),
    FieldMeta::identity("offset", &["offset"]),
    FieldMeta::enum_wire("thumbnail_size", &["thumbnail_size"]),
];

impl QueryParams for SearchParametersLicenseHistory {
    fn field_table(&self) -> &'static [FieldMeta] {
        LICENSE_HISTORY_PARAMETER_FIELDS
    }

    fn field_values(&self) -> Vec<Option<ParamValue<'_>>> {
        vec![
            self.limit.map(ParamValue::from),
            self.offset.map(ParamValue::from),
            self.thumbnail_size.map(ParamValue::wire),
        ]
    }
}

/// A license history call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LicenseHistoryRequest {
    locale: Option<String>,
    search_parameters: Option<SearchParametersLicenseHistory>,
    result_columns: Option<Vec<LicenseHistoryResultColumn>>,
}

crate::deep_clone_struct!(LicenseHistoryRequest {
    locale,
    search_parameters,
    result_columns,
});

impl LicenseHistoryRequest {
    /// Empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Response language, e.g. `en_US`
    pub fn with_locale(mut self, locale: impl Into<String>) -> Result<Self> {
        self.locale = Some(non_blank("locale", locale)?);
        Ok(self)
    }

    /// Paging parameters
    pub fn with_search_parameters(mut self, params: SearchParametersLicenseHistory) -> Self {
        self.search_parameters = Some(params);
        self
    }

    /// Extra columns to return; duplicates are dropped
    pub fn with_result_columns(
        mut self,
        columns: impl IntoIterator<Item = LicenseHistoryResultColumn>,
    ) -> Self {
        self.result_columns = Some(dedup_preserving_order(columns));
        self
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn search_parameters(&self) -> Option<&SearchParametersLicenseHistory> {
        self.search_parameters.as_ref()
    }

    pub fn result_columns(&self) -> Option<&[LicenseHistoryResultColumn]> {
        self.result_columns.as_deref()
    }
}

static LICENSE_HISTORY_REQUEST_FIELDS: &[FieldMeta] = &[
    FieldMeta::identity("locale", &["locale"]),
    FieldMeta::identity("search_parameters", &["search_parameters"]),
    FieldMeta::repeat("result_columns", &["result_columns"]),
];

impl QueryParams for LicenseHistoryRequest {
    fn field_table(&self) -> &'static [FieldMeta] {
        LICENSE_HISTORY_REQUEST_FIELDS
    }

    fn field_values(&self) -> Vec<Option<ParamValue<'_>>> {
        vec![
            self.locale.as_ref().map(ParamValue::from),
            self.search_parameters
                .as_ref()
                .map(|params| ParamValue::Object(params as &dyn QueryParams)),
            self.result_columns
                .as_ref()
                .map(|columns| ParamValue::wire_seq(columns.iter().copied())),
        ]
    }
}

impl PagedRequest for LicenseHistoryRequest {
    type Response = LicenseHistoryResponse;

    fn page_limit(&self) -> Option<u32> {
        self.search_parameters.as_ref().and_then(|p| p.limit)
    }

    fn page_offset(&self) -> Option<u32> {
        self.search_parameters.as_ref().and_then(|p| p.offset)
    }

    fn set_page_limit(&mut self, limit: u32) {
        self.search_parameters.get_or_insert_with(Default::default).limit = Some(limit);
    }

    fn set_page_offset(&mut self, offset: u32) {
        self.search_parameters.get_or_insert_with(Default::default).offset = Some(offset);
    }
}

/// One page of license history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LicenseHistoryResponse {
    /// Total number of licensed files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_results: Option<u64>,
    /// Entries on this page
    #[serde(default)]
    pub files: Vec<StockLicenseHistoryFile>,
}

impl PagedResponse for LicenseHistoryResponse {
    fn nb_results(&self) -> Option<u64> {
        self.nb_results
    }
}

/// A licensed file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct StockLicenseHistoryFile {
    pub license: Option<String>,
    pub license_date: Option<String>,
    pub download_url: Option<String>,
    pub id: Option<u64>,
    pub title: Option<String>,
    pub creator_id: Option<u64>,
    pub creator_name: Option<String>,
    pub vector_type: Option<String>,
    pub content_type: Option<String>,
    pub media_type_id: Option<AssetType>,
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub content_url: Option<String>,
    pub details_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub thumbnail_width: Option<f64>,
    pub thumbnail_height: Option<f64>,
    pub thumbnail_110_url: Option<String>,
    pub thumbnail_110_width: Option<f64>,
    pub thumbnail_110_height: Option<f64>,
    pub thumbnail_160_url: Option<String>,
    pub thumbnail_160_width: Option<f64>,
    pub thumbnail_160_height: Option<f64>,
    pub thumbnail_220_url: Option<String>,
    pub thumbnail_220_width: Option<f64>,
    pub thumbnail_220_height: Option<f64>,
    pub thumbnail_240_url: Option<String>,
    pub thumbnail_240_width: Option<f64>,
    pub thumbnail_240_height: Option<f64>,
    pub thumbnail_500_url: Option<String>,
    pub thumbnail_500_width: Option<f64>,
    pub thumbnail_500_height: Option<f64>,
    pub thumbnail_1000_url: Option<String>,
    pub thumbnail_1000_width: Option<f64>,
    pub thumbnail_1000_height: Option<f64>,
}
