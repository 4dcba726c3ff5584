//! Search files request and response

use super::category::StockFileCategory;
use super::enums::{
    Asset3DType, AssetAge, AssetHasReleases, AssetLicenseState, AssetOrientation,
    AssetPremiumCategory, AssetPremiumLevel, AssetTemplateCategory, AssetTemplateType,
    AssetThumbSize, AssetType, AssetVideoDuration, AssetsOrder, ResultColumn,
};
use super::{dedup_preserving_order, non_blank, positive_id};
use crate::error::{Error, Result};
use crate::pagination::{PagedRequest, PagedResponse};
use crate::query::{FieldMeta, ParamValue, QueryParams};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest page size the search endpoint accepts
pub const MAX_SEARCH_LIMIT: u32 = 64;

// ============================================================================
// Search parameters
// ============================================================================

/// Filters and paging for a search files call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParameters {
    creator_id: Option<u64>,
    media_id: Option<u64>,
    model_id: Option<u64>,
    serie_id: Option<u64>,
    similar: Option<u64>,
    category: Option<u64>,
    limit: Option<u32>,
    offset: Option<u32>,
    words: Option<String>,
    similar_url: Option<String>,
    filter_colors: Option<String>,
    gallery_id: Option<String>,
    filter_area_pixels: Option<u64>,
    similar_image: Option<bool>,
    filter_content_type_photo: Option<bool>,
    filter_content_type_illustration: Option<bool>,
    filter_content_type_vector: Option<bool>,
    filter_content_type_video: Option<bool>,
    filter_content_type_template: Option<bool>,
    filter_content_type_3d: Option<bool>,
    filter_content_type_all: Option<bool>,
    filter_editorial: Option<bool>,
    filter_offensive_2: Option<bool>,
    filter_isolated_on: Option<bool>,
    filter_panoramic_on: Option<bool>,
    filter_thumbnail_size: Option<AssetThumbSize>,
    filter_orientation: Option<AssetOrientation>,
    filter_age: Option<AssetAge>,
    filter_video_duration: Option<AssetVideoDuration>,
    filter_template_types: Option<Vec<AssetTemplateType>>,
    filter_3d_types: Option<Vec<Asset3DType>>,
    filter_template_category_ids: Option<Vec<AssetTemplateCategory>>,
    order: Option<AssetsOrder>,
    filter_premium: Option<AssetPremiumCategory>,
    filter_has_releases: Option<AssetHasReleases>,
}

crate::deep_clone_struct!(SearchParameters {
    creator_id,
    media_id,
    model_id,
    serie_id,
    similar,
    category,
    limit,
    offset,
    words,
    similar_url,
    filter_colors,
    gallery_id,
    filter_area_pixels,
    similar_image,
    filter_content_type_photo,
    filter_content_type_illustration,
    filter_content_type_vector,
    filter_content_type_video,
    filter_content_type_template,
    filter_content_type_3d,
    filter_content_type_all,
    filter_editorial,
    filter_offensive_2,
    filter_isolated_on,
    filter_panoramic_on,
    filter_thumbnail_size,
    filter_orientation,
    filter_age,
    filter_video_duration,
    filter_template_types,
    filter_3d_types,
    filter_template_category_ids,
    order,
    filter_premium,
    filter_has_releases,
});

/// Setters for fields that need no validation
macro_rules! plain_setters {
    ($($(#[$doc:meta])* $setter:ident($field:ident: $ty:ty)),* $(,)?) => {$(
        $(#[$doc])*
        pub fn $setter(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    )*};
}

/// Getters for `Copy` fields
macro_rules! copy_getters {
    ($($field:ident: $ty:ty),* $(,)?) => {$(
        #[allow(missing_docs)]
        pub fn $field(&self) -> Option<$ty> {
            self.$field
        }
    )*};
}

impl SearchParameters {
    /// Empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict results to one creator
    pub fn with_creator_id(mut self, id: u64) -> Result<Self> {
        self.creator_id = Some(positive_id("creator_id", id)?);
        Ok(self)
    }

    /// Look up a single media id
    pub fn with_media_id(mut self, id: u64) -> Result<Self> {
        self.media_id = Some(positive_id("media_id", id)?);
        Ok(self)
    }

    /// Restrict results to one model
    pub fn with_model_id(mut self, id: u64) -> Result<Self> {
        self.model_id = Some(positive_id("model_id", id)?);
        Ok(self)
    }

    /// Restrict results to one series
    pub fn with_serie_id(mut self, id: u64) -> Result<Self> {
        self.serie_id = Some(positive_id("serie_id", id)?);
        Ok(self)
    }

    /// Files visually similar to the given media id
    pub fn with_similar(mut self, id: u64) -> Result<Self> {
        self.similar = Some(positive_id("similar", id)?);
        Ok(self)
    }

    /// Restrict results to one category
    pub fn with_category(mut self, id: u64) -> Result<Self> {
        self.category = Some(positive_id("category", id)?);
        Ok(self)
    }

    /// Page size, between 1 and [`MAX_SEARCH_LIMIT`]
    pub fn with_limit(mut self, limit: u32) -> Result<Self> {
        if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
            return Err(Error::validation(format!(
                "limit must be between 1 and {MAX_SEARCH_LIMIT}, got {limit}"
            )));
        }
        self.limit = Some(limit);
        Ok(self)
    }

    /// Number of results to skip
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Keyword query
    pub fn with_words(mut self, words: impl Into<String>) -> Result<Self> {
        self.words = Some(non_blank("words", words)?);
        Ok(self)
    }

    /// Files visually similar to the image at this URL
    pub fn with_similar_url(mut self, url: impl Into<String>) -> Result<Self> {
        self.similar_url = Some(non_blank("similar_url", url)?);
        Ok(self)
    }

    /// Comma separated hex colors
    pub fn with_filter_colors(mut self, colors: impl Into<String>) -> Result<Self> {
        self.filter_colors = Some(non_blank("filters[colors]", colors)?);
        Ok(self)
    }

    /// Restrict results to one gallery
    pub fn with_gallery_id(mut self, id: impl Into<String>) -> Result<Self> {
        self.gallery_id = Some(non_blank("gallery_id", id)?);
        Ok(self)
    }

    plain_setters!(
        /// Minimum image area in pixels
        with_filter_area_pixels(filter_area_pixels: u64),
        /// Search by the image attached to the request
        with_similar_image(similar_image: bool),
        with_filter_content_type_photo(filter_content_type_photo: bool),
        with_filter_content_type_illustration(filter_content_type_illustration: bool),
        with_filter_content_type_vector(filter_content_type_vector: bool),
        with_filter_content_type_video(filter_content_type_video: bool),
        with_filter_content_type_template(filter_content_type_template: bool),
        with_filter_content_type_3d(filter_content_type_3d: bool),
        with_filter_content_type_all(filter_content_type_all: bool),
        with_filter_editorial(filter_editorial: bool),
        /// Include offensive content
        with_filter_offensive_2(filter_offensive_2: bool),
        with_filter_isolated_on(filter_isolated_on: bool),
        with_filter_panoramic_on(filter_panoramic_on: bool),
        with_filter_thumbnail_size(filter_thumbnail_size: AssetThumbSize),
        with_filter_orientation(filter_orientation: AssetOrientation),
        with_filter_age(filter_age: AssetAge),
        with_filter_video_duration(filter_video_duration: AssetVideoDuration),
        with_order(order: AssetsOrder),
        with_filter_premium(filter_premium: AssetPremiumCategory),
        with_filter_has_releases(filter_has_releases: AssetHasReleases),
    );

    /// Template types to include
    pub fn with_filter_template_types(
        mut self,
        types: impl IntoIterator<Item = AssetTemplateType>,
    ) -> Self {
        self.filter_template_types = Some(types.into_iter().collect());
        self
    }

    /// 3D types to include
    pub fn with_filter_3d_types(mut self, types: impl IntoIterator<Item = Asset3DType>) -> Self {
        self.filter_3d_types = Some(types.into_iter().collect());
        self
    }

    /// Template categories to include
    pub fn with_filter_template_category_ids(
        mut self,
        categories: impl IntoIterator<Item = AssetTemplateCategory>,
    ) -> Self {
        self.filter_template_category_ids = Some(categories.into_iter().collect());
        self
    }

    copy_getters!(
        creator_id: u64,
        media_id: u64,
        model_id: u64,
        serie_id: u64,
        similar: u64,
        category: u64,
        limit: u32,
        offset: u32,
        filter_area_pixels: u64,
        similar_image: bool,
        filter_content_type_photo: bool,
        filter_content_type_illustration: bool,
        filter_content_type_vector: bool,
        filter_content_type_video: bool,
        filter_content_type_template: bool,
        filter_content_type_3d: bool,
        filter_content_type_all: bool,
        filter_editorial: bool,
        filter_offensive_2: bool,
        filter_isolated_on: bool,
        filter_panoramic_on: bool,
        filter_thumbnail_size: AssetThumbSize,
        filter_orientation: AssetOrientation,
        filter_age: AssetAge,
        filter_video_duration: AssetVideoDuration,
        order: AssetsOrder,
        filter_premium: AssetPremiumCategory,
        filter_has_releases: AssetHasReleases,
    );

    /// Keyword query
    pub fn words(&self) -> Option<&str> {
        self.words.as_deref()
    }

    /// Similar image URL
    pub fn similar_url(&self) -> Option<&str> {
        self.similar_url.as_deref()
    }

    /// Color filter
    pub fn filter_colors(&self) -> Option<&str> {
        self.filter_colors.as_deref()
    }

    /// Gallery id
    pub fn gallery_id(&self) -> Option<&str> {
        self.gallery_id.as_deref()
    }

    /// Template type filter
    pub fn filter_template_types(&self) -> Option<&[AssetTemplateType]> {
        self.filter_template_types.as_deref()
    }

    /// 3D type filter
    pub fn filter_3d_types(&self) -> Option<&[Asset3DType]> {
        self.filter_3d_types.as_deref()
    }

    /// Template category filter
    pub fn filter_template_category_ids(&self) -> Option<&[AssetTemplateCategory]> {
        self.filter_template_category_ids.as_deref()
    }

    pub(crate) fn set_limit(&mut self, limit: u32) {
        self.limit = Some(limit);
    }

    pub(crate) fn set_offset(&mut self, offset: u32) {
        self.offset = Some(offset);
    }
}

static SEARCH_PARAMETER_FIELDS: &[FieldMeta] = &[
    FieldMeta::identity("creator_id", &["creator_id"]),
    FieldMeta::identity("media_id", &["media_id"]),
    FieldMeta::identity("model_id", &["model_id"]),
    FieldMeta::identity("serie_id", &["serie_id"]),
    FieldMeta::identity("similar", &["similar"]),
    FieldMeta::identity("category", &["category"]),
    FieldMeta::identity("limit", &["limit"]),
    FieldMeta::identity("offset", &["offset"]),
    FieldMeta::identity("words", &["words"]),
    FieldMeta::identity("similar_url", &["similar_url"]),
    FieldMeta::identity("filter_colors", &["filters", "colors"]),
    FieldMeta::identity("gallery_id", &["gallery_id"]),
    FieldMeta::identity("filter_area_pixels", &["filters", "area_pixels"]),
    FieldMeta::bool_to_int("similar_image", &["similar_image"]),
    FieldMeta::bool_to_int("filter_content_type_photo", &["filters", "content_type:photo"]),
    FieldMeta::bool_to_int(
        "filter_content_type_illustration",
        &["filters", "content_type:illustration"],
    ),
    FieldMeta::bool_to_int("filter_content_type_vector", &["filters", "content_type:vector"]),
    FieldMeta::bool_to_int("filter_content_type_video", &["filters", "content_type:video"]),
    FieldMeta::bool_to_int(
        "filter_content_type_template",
        &["filters", "content_type:template"],
    ),
    FieldMeta::bool_to_int("filter_content_type_3d", &["filters", "content_type:3d"]),
    FieldMeta::bool_to_int("filter_content_type_all", &["filters", "content_type:all"]),
    FieldMeta::bool_to_int("filter_editorial", &["filters", "editorial"]),
    FieldMeta::bool_to_int("filter_offensive_2", &["filters", "offensive:2"]),
    FieldMeta::bool_to_int("filter_isolated_on", &["filters", "isolated:on"]),
    FieldMeta::bool_to_int("filter_panoramic_on", &["filters", "panoramic:on"]),
    FieldMeta::enum_wire("filter_thumbnail_size", &["filters", "thumbnail_size"]),
    FieldMeta::enum_wire("filter_orientation", &["filters", "orientation"]),
    FieldMeta::enum_wire("filter_age", &["filters", "age"]),
    FieldMeta::enum_wire("filter_video_duration", &["filters", "video_duration"]),
    FieldMeta::repeat("filter_template_types", &["filters", "template_type_id"]),
    FieldMeta::repeat("filter_3d_types", &["filters", "3d_type_id"]),
    FieldMeta::repeat(
        "filter_template_category_ids",
        &["filters", "template_category_id"],
    ),
    FieldMeta::enum_wire("order", &["order"]),
    FieldMeta::enum_wire("filter_premium", &["filters", "premium"]),
    FieldMeta::enum_wire("filter_has_releases", &["filters", "has_releases"]),
];

impl QueryParams for SearchParameters {
    fn field_table(&self) -> &'static [FieldMeta] {
        SEARCH_PARAMETER_FIELDS
    }

    fn field_values(&self) -> Vec<Option<ParamValue<'_>>> {
        vec![
            self.creator_id.map(ParamValue::from),
            self.media_id.map(ParamValue::from),
            self.model_id.map(ParamValue::from),
            self.serie_id.map(ParamValue::from),
            self.similar.map(ParamValue::from),
            self.category.map(ParamValue::from),
            self.limit.map(ParamValue::from),
            self.offset.map(ParamValue::from),
            self.words.as_ref().map(ParamValue::from),
            self.similar_url.as_ref().map(ParamValue::from),
            self.filter_colors.as_ref().map(ParamValue::from),
            self.gallery_id.as_ref().map(ParamValue::from),
            self.filter_area_pixels.map(ParamValue::from),
            self.similar_image.map(ParamValue::from),
            self.filter_content_type_photo.map(ParamValue::from),
            self.filter_content_type_illustration.map(ParamValue::from),
            self.filter_content_type_vector.map(ParamValue::from),
            self.filter_content_type_video.map(ParamValue::from),
            self.filter_content_type_template.map(ParamValue::from),
            self.filter_content_type_3d.map(ParamValue::from),
            self.filter_content_type_all.map(ParamValue::from),
            self.filter_editorial.map(ParamValue::from),
            self.filter_offensive_2.map(ParamValue::from),
            self.filter_isolated_on.map(ParamValue::from),
            self.filter_panoramic_on.map(ParamValue::from),
            self.filter_thumbnail_size.map(ParamValue::wire),
            self.filter_orientation.map(ParamValue::wire),
            self.filter_age.map(ParamValue::wire),
            self.filter_video_duration.map(ParamValue::wire),
            self.filter_template_types
                .as_ref()
                .map(|types| ParamValue::wire_seq(types.iter().copied())),
            self.filter_3d_types
                .as_ref()
                .map(|types| ParamValue::wire_seq(types.iter().copied())),
            self.filter_template_category_ids
                .as_ref()
                .map(|ids| ParamValue::wire_seq(ids.iter().copied())),
            self.order.map(ParamValue::wire),
            self.filter_premium.map(ParamValue::wire),
            self.filter_has_releases.map(ParamValue::wire),
        ]
    }
}

// ============================================================================
// Request
// ============================================================================

/// A search files call: locale, parameters, requested columns and an
/// optional image for similarity search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilesRequest {
    locale: Option<String>,
    search_parameters: Option<SearchParameters>,
    result_columns: Option<Vec<ResultColumn>>,
    similar_image: Option<Vec<u8>>,
}

crate::deep_clone_struct!(SearchFilesRequest {
    locale,
    search_parameters,
    result_columns,
    similar_image,
});

impl SearchFilesRequest {
    /// Empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Response language, e.g. `en_US`
    pub fn with_locale(mut self, locale: impl Into<String>) -> Result<Self> {
        self.locale = Some(non_blank("locale", locale)?);
        Ok(self)
    }

    /// Search parameters
    pub fn with_search_parameters(mut self, params: SearchParameters) -> Self {
        self.search_parameters = Some(params);
        self
    }

    /// Columns to return; duplicates are dropped
    pub fn with_result_columns(mut self, columns: impl IntoIterator<Item = ResultColumn>) -> Self {
        self.result_columns = Some(dedup_preserving_order(columns));
        self
    }

    /// Image for similarity search
    pub fn with_similar_image(mut self, image: Vec<u8>) -> Result<Self> {
        if image.is_empty() {
            return Err(Error::validation("similar image can't be empty"));
        }
        self.similar_image = Some(image);
        Ok(self)
    }

    /// Response language
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Search parameters
    pub fn search_parameters(&self) -> Option<&SearchParameters> {
        self.search_parameters.as_ref()
    }

    /// Requested columns; `None` means the API default set
    pub fn result_columns(&self) -> Option<&[ResultColumn]> {
        self.result_columns.as_deref()
    }

    /// Image for similarity search
    pub fn similar_image(&self) -> Option<&[u8]> {
        self.similar_image.as_deref()
    }

    /// Whether `column` will be present in responses
    pub fn requests_column(&self, column: ResultColumn) -> bool {
        self.result_columns
            .as_ref()
            .map_or(true, |columns| columns.contains(&column))
    }

    /// Add `column` to an explicit column list; returns whether it was added
    pub(crate) fn add_result_column(&mut self, column: ResultColumn) -> bool {
        match &mut self.result_columns {
            Some(columns) if !columns.contains(&column) => {
                columns.push(column);
                true
            }
            _ => false,
        }
    }
}

static SEARCH_FILES_REQUEST_FIELDS: &[FieldMeta] = &[
    FieldMeta::identity("locale", &["locale"]),
    FieldMeta::identity("search_parameters", &["search_parameters"]),
    FieldMeta::repeat("result_columns", &["result_columns"]),
];

impl QueryParams for SearchFilesRequest {
    fn field_table(&self) -> &'static [FieldMeta] {
        SEARCH_FILES_REQUEST_FIELDS
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

impl PagedRequest for SearchFilesRequest {
    type Response = SearchFilesResponse;

    fn page_limit(&self) -> Option<u32> {
        self.search_parameters.as_ref().and_then(SearchParameters::limit)
    }

    fn page_offset(&self) -> Option<u32> {
        self.search_parameters.as_ref().and_then(SearchParameters::offset)
    }

    fn set_page_limit(&mut self, limit: u32) {
        self.search_parameters
            .get_or_insert_with(SearchParameters::default)
            .set_limit(limit);
    }

    fn set_page_offset(&mut self, offset: u32) {
        self.search_parameters
            .get_or_insert_with(SearchParameters::default)
            .set_offset(offset);
    }
}

// ============================================================================
// Response
// ============================================================================

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilesResponse {
    /// Total number of matching files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_results: Option<u64>,
    /// Files on this page
    #[serde(default)]
    pub files: Vec<StockFile>,
}

impl PagedResponse for SearchFilesResponse {
    fn nb_results(&self) -> Option<u64> {
        self.nb_results
    }
}

/// Keyword attached to a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockFileKeyword {
    pub name: Option<String>,
}

/// A file returned by search; only requested columns are populated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct StockFile {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub creator_id: Option<u64>,
    pub creator_name: Option<String>,
    pub creation_date: Option<String>,
    pub country_name: Option<String>,
    pub thumbnail_url: Option<String>,
    pub thumbnail_html_tag: Option<String>,
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
    pub width: Option<u64>,
    pub height: Option<u64>,
    pub is_licensed: Option<AssetLicenseState>,
    pub comp_url: Option<String>,
    pub comp_width: Option<u64>,
    pub comp_height: Option<u64>,
    pub nb_views: Option<u64>,
    pub nb_downloads: Option<u64>,
    pub category: Option<StockFileCategory>,
    pub keywords: Option<Vec<StockFileKeyword>>,
    pub has_releases: Option<bool>,
    pub media_type_id: Option<AssetType>,
    pub vector_type: Option<String>,
    pub content_type: Option<String>,
    pub framerate: Option<f64>,
    pub duration: Option<u64>,
    pub stock_id: Option<String>,
    pub comps: Option<Value>,
    pub details_url: Option<String>,
    pub template_type_id: Option<AssetTemplateType>,
    pub template_category_ids: Option<Vec<AssetTemplateCategory>>,
    pub marketing_text: Option<String>,
    pub description: Option<String>,
    pub size_bytes: Option<u64>,
    pub premium_level_id: Option<AssetPremiumLevel>,
    pub is_premium: Option<bool>,
    pub is_editorial: Option<bool>,
    pub licenses: Option<Value>,
    pub video_preview_url: Option<String>,
    pub video_preview_width: Option<u64>,
    pub video_preview_height: Option<u64>,
    pub video_preview_content_length: Option<u64>,
    pub video_preview_content_type: Option<String>,
    pub video_small_preview_url: Option<String>,
    pub video_small_preview_width: Option<u64>,
    pub video_small_preview_height: Option<u64>,
    pub video_small_preview_content_length: Option<u64>,
    pub video_small_preview_content_type: Option<String>,
}
