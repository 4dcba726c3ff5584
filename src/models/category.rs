//! Category lookup request and response

use super::{non_blank, positive_id};
use crate::error::Result;
use crate::query::{FieldMeta, ParamValue, QueryParams};
use serde::{Deserialize, Serialize};

/// Request for a category or the category tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCategoryRequest {
    locale: Option<String>,
    category_id: Option<u64>,
}

crate::deep_clone_struct!(SearchCategoryRequest { locale, category_id });

impl SearchCategoryRequest {
    /// Empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Response language, e.g. `en_US`
    pub fn with_locale(mut self, locale: impl Into<String>) -> Result<Self> {
        self.locale = Some(non_blank("locale", locale)?);
        Ok(self)
    }

    /// Category to look up, or the root of the tree
    pub fn with_category_id(mut self, id: u64) -> Result<Self> {
        self.category_id = Some(positive_id("category_id", id)?);
        Ok(self)
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn category_id(&self) -> Option<u64> {
        self.category_id
    }
}

static SEARCH_CATEGORY_FIELDS: &[FieldMeta] = &[
    FieldMeta::identity("locale", &["locale"]),
    FieldMeta::identity("category_id", &["category_id"]),
];

impl QueryParams for SearchCategoryRequest {
    fn field_table(&self) -> &'static [FieldMeta] {
        SEARCH_CATEGORY_FIELDS
    }

    fn field_values(&self) -> Vec<Option<ParamValue<'_>>> {
        vec![
            self.locale.as_ref().map(ParamValue::from),
            self.category_id.map(ParamValue::from),
        ]
    }
}

/// A node of the category tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockFileCategory {
    /// Category id
    pub id: Option<u64>,
    /// Localized name
    pub name: Option<String>,
    /// Link to the category page
    pub link: Option<String>,
}
