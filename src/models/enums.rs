//! Wire enums
//!
//! Closed value sets exchanged with the API. Every constant has a canonical
//! wire string (used in query strings); numeric sets additionally carry their
//! integer id, which is how they appear in JSON bodies.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Serde and clone support for enums identified by their wire string
macro_rules! string_wire {
    ($($ty:ident),+ $(,)?) => {$(
        impl $ty {
            /// Canonical wire string
            pub fn wire(self) -> &'static str {
                self.into()
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.wire())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(|_| {
                    D::Error::custom(format!("unknown {} value '{raw}'", stringify!($ty)))
                })
            }
        }

        crate::deep_clone_by_value!($ty);
    )+};
}

/// Serde and clone support for enums identified by an integer id
macro_rules! numeric_wire {
    ($($ty:ident),+ $(,)?) => {$(
        impl $ty {
            /// Canonical wire string (the id in decimal)
            pub fn wire(self) -> &'static str {
                self.into()
            }

            /// Integer id
            pub fn id(self) -> u32 {
                self as u32
            }

            /// Look up a constant by id
            pub fn from_id(id: u32) -> Option<Self> {
                Self::iter().find(|v| v.id() == id)
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u32(self.id())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let id = u32::deserialize(deserializer)?;
                Self::from_id(id).ok_or_else(|| {
                    D::Error::custom(format!("unknown {} id {id}", stringify!($ty)))
                })
            }
        }

        crate::deep_clone_by_value!($ty);
    )+};
}

// ============================================================================
// Result columns
// ============================================================================

/// Columns a search response may contain
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum ResultColumn {
    NbResults,
    Id,
    Title,
    CreatorName,
    CreatorId,
    CountryName,
    Width,
    Height,
    ThumbnailUrl,
    ThumbnailHtmlTag,
    ThumbnailWidth,
    ThumbnailHeight,
    #[strum(serialize = "thumbnail_110_url")]
    Thumbnail110Url,
    #[strum(serialize = "thumbnail_110_width")]
    Thumbnail110Width,
    #[strum(serialize = "thumbnail_110_height")]
    Thumbnail110Height,
    #[strum(serialize = "thumbnail_160_url")]
    Thumbnail160Url,
    #[strum(serialize = "thumbnail_160_width")]
    Thumbnail160Width,
    #[strum(serialize = "thumbnail_160_height")]
    Thumbnail160Height,
    #[strum(serialize = "thumbnail_220_url")]
    Thumbnail220Url,
    #[strum(serialize = "thumbnail_220_width")]
    Thumbnail220Width,
    #[strum(serialize = "thumbnail_220_height")]
    Thumbnail220Height,
    #[strum(serialize = "thumbnail_240_url")]
    Thumbnail240Url,
    #[strum(serialize = "thumbnail_240_width")]
    Thumbnail240Width,
    #[strum(serialize = "thumbnail_240_height")]
    Thumbnail240Height,
    #[strum(serialize = "thumbnail_500_url")]
    Thumbnail500Url,
    #[strum(serialize = "thumbnail_500_width")]
    Thumbnail500Width,
    #[strum(serialize = "thumbnail_500_height")]
    Thumbnail500Height,
    #[strum(serialize = "thumbnail_1000_url")]
    Thumbnail1000Url,
    #[strum(serialize = "thumbnail_1000_width")]
    Thumbnail1000Width,
    #[strum(serialize = "thumbnail_1000_height")]
    Thumbnail1000Height,
    MediaTypeId,
    Category,
    CategoryHierarchy,
    NbViews,
    NbDownloads,
    CreationDate,
    Keywords,
    HasReleases,
    CompUrl,
    CompWidth,
    CompHeight,
    IsLicensed,
    VectorType,
    ContentType,
    Framerate,
    Duration,
    StockId,
    Comps,
    DetailsUrl,
    TemplateTypeId,
    TemplateCategoryIds,
    MarketingText,
    Description,
    SizeBytes,
    PremiumLevelId,
    IsEditorial,
    IsPremium,
    Licenses,
    VideoPreviewUrl,
    VideoPreviewWidth,
    VideoPreviewHeight,
    VideoPreviewContentLength,
    VideoPreviewContentType,
    VideoSmallPreviewUrl,
    VideoSmallPreviewWidth,
    VideoSmallPreviewHeight,
    VideoSmallPreviewContentLength,
    VideoSmallPreviewContentType,
}

/// Columns a license history response may contain
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter,
)]
pub enum LicenseHistoryResultColumn {
    #[strum(serialize = "thumbnail_110_url")]
    Thumbnail110Url,
    #[strum(serialize = "thumbnail_110_width")]
    Thumbnail110Width,
    #[strum(serialize = "thumbnail_110_height")]
    Thumbnail110Height,
    #[strum(serialize = "thumbnail_160_url")]
    Thumbnail160Url,
    #[strum(serialize = "thumbnail_160_width")]
    Thumbnail160Width,
    #[strum(serialize = "thumbnail_160_height")]
    Thumbnail160Height,
    #[strum(serialize = "thumbnail_220_url")]
    Thumbnail220Url,
    #[strum(serialize = "thumbnail_220_width")]
    Thumbnail220Width,
    #[strum(serialize = "thumbnail_220_height")]
    Thumbnail220Height,
    #[strum(serialize = "thumbnail_240_url")]
    Thumbnail240Url,
    #[strum(serialize = "thumbnail_240_width")]
    Thumbnail240Width,
    #[strum(serialize = "thumbnail_240_height")]
    Thumbnail240Height,
    #[strum(serialize = "thumbnail_500_url")]
    Thumbnail500Url,
    #[strum(serialize = "thumbnail_500_width")]
    Thumbnail500Width,
    #[strum(serialize = "thumbnail_500_height")]
    Thumbnail500Height,
    #[strum(serialize = "thumbnail_1000_url")]
    Thumbnail1000Url,
    #[strum(serialize = "thumbnail_1000_width")]
    Thumbnail1000Width,
    #[strum(serialize = "thumbnail_1000_height")]
    Thumbnail1000Height,
}

// ============================================================================
// Search filters
// ============================================================================

/// Sort order of search results
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum AssetsOrder {
    Relevance,
    Creation,
    Popularity,
    NbDownloads,
    Undiscovered,
}

/// Orientation filter
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum AssetOrientation {
    Horizontal,
    Vertical,
    Square,
    All,
}

/// Age filter
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter,
)]
pub enum AssetAge {
    #[strum(serialize = "1w")]
    OneWeek,
    #[strum(serialize = "1m")]
    OneMonth,
    #[strum(serialize = "6m")]
    SixMonths,
    #[strum(serialize = "1y")]
    OneYear,
    #[strum(serialize = "2y")]
    TwoYears,
    #[strum(serialize = "all")]
    All,
}

/// Video duration filter, in seconds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter,
)]
pub enum AssetVideoDuration {
    #[strum(serialize = "10")]
    Ten,
    #[strum(serialize = "20")]
    Twenty,
    #[strum(serialize = "30")]
    Thirty,
    #[strum(serialize = "30-")]
    AboveThirty,
    #[strum(serialize = "all")]
    All,
}

/// Premium content filter
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum AssetPremiumCategory {
    True,
    False,
    All,
}

/// Model/property release filter
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum AssetHasReleases {
    True,
    False,
    All,
}

/// License state reported in `is_licensed`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, EnumIter,
)]
pub enum AssetLicenseState {
    #[strum(serialize = "Standard")]
    Standard,
    #[strum(serialize = "Extended")]
    Extended,
    #[strum(serialize = "Video_HD")]
    VideoHd,
    #[strum(serialize = "Video_4K")]
    Video4k,
    #[strum(serialize = "Standard_M")]
    StandardM,
    #[strum(serialize = "")]
    Empty,
}

string_wire!(
    ResultColumn,
    LicenseHistoryResultColumn,
    AssetsOrder,
    AssetOrientation,
    AssetAge,
    AssetVideoDuration,
    AssetPremiumCategory,
    AssetHasReleases,
    AssetLicenseState,
);

// ============================================================================
// Numeric sets
// ============================================================================

/// Thumbnail size filter, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[repr(u32)]
pub enum AssetThumbSize {
    #[strum(serialize = "110")]
    Medium = 110,
    #[strum(serialize = "160")]
    Big = 160,
    #[strum(serialize = "500")]
    Xl = 500,
    #[strum(serialize = "1000")]
    Xxl = 1000,
}

/// Template type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[repr(u32)]
pub enum AssetTemplateType {
    #[strum(serialize = "1")]
    Psdt = 1,
    #[strum(serialize = "2")]
    Ait = 2,
    #[strum(serialize = "3")]
    Indt = 3,
}

/// 3D asset type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[repr(u32)]
pub enum Asset3DType {
    #[strum(serialize = "1")]
    Models = 1,
    #[strum(serialize = "2")]
    Lights = 2,
    #[strum(serialize = "3")]
    Materials = 3,
}

/// Template category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[repr(u32)]
pub enum AssetTemplateCategory {
    #[strum(serialize = "1")]
    Mobile = 1,
    #[strum(serialize = "2")]
    Web = 2,
    #[strum(serialize = "3")]
    Print = 3,
    #[strum(serialize = "4")]
    Photo = 4,
    #[strum(serialize = "5")]
    Film = 5,
    #[strum(serialize = "6")]
    Art = 6,
}

/// Premium level of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[repr(u32)]
pub enum AssetPremiumLevel {
    #[strum(serialize = "0")]
    Core = 0,
    #[strum(serialize = "1")]
    Free = 1,
    #[strum(serialize = "2")]
    Premium1 = 2,
    #[strum(serialize = "3")]
    Premium2 = 3,
    #[strum(serialize = "4")]
    Premium3 = 4,
}

/// Media type of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[repr(u32)]
pub enum AssetType {
    #[strum(serialize = "1")]
    Photos = 1,
    #[strum(serialize = "2")]
    Illustrations = 2,
    #[strum(serialize = "3")]
    Vectors = 3,
    #[strum(serialize = "4")]
    Videos = 4,
    #[strum(serialize = "5")]
    InstantPhotos = 5,
    #[strum(serialize = "6")]
    ThreeDimensional = 6,
    #[strum(serialize = "7")]
    Templates = 7,
}

/// License history thumbnail size, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[repr(u32)]
pub enum LicenseHistoryThumbnailSize {
    #[strum(serialize = "110")]
    Medium = 110,
    #[strum(serialize = "160")]
    Big = 160,
    #[strum(serialize = "220")]
    Large = 220,
    #[strum(serialize = "240")]
    VeryLarge = 240,
    #[strum(serialize = "500")]
    Xl = 500,
    #[strum(serialize = "1000")]
    Xxl = 1000,
}

numeric_wire!(
    AssetThumbSize,
    AssetTemplateType,
    Asset3DType,
    AssetTemplateCategory,
    AssetPremiumLevel,
    AssetType,
    LicenseHistoryThumbnailSize,
);
