//! Query field metadata and values

use std::borrow::Cow;

/// Transformation applied to a field value before it enters the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Scalar rendered as-is (enums render their wire string)
    Identity,
    /// Boolean rendered as `"1"` / `"0"`
    BoolToInt,
    /// Enum rendered as its wire string; any other type is rejected
    EnumWire,
    /// Sequence rendered as one `key[]=value` pair per element
    RepeatEach,
}

/// Static description of one query field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Field name, used in error messages
    pub name: &'static str,
    /// Key path segments, e.g. `["filters", "content_type:photo"]`
    pub path: &'static [&'static str],
    /// Coercion rule
    pub coercion: Coercion,
}

impl FieldMeta {
    /// Field rendered without coercion
    pub const fn identity(name: &'static str, path: &'static [&'static str]) -> Self {
        Self {
            name,
            path,
            coercion: Coercion::Identity,
        }
    }

    /// Boolean field rendered as `1`/`0`
    pub const fn bool_to_int(name: &'static str, path: &'static [&'static str]) -> Self {
        Self {
            name,
            path,
            coercion: Coercion::BoolToInt,
        }
    }

    /// Enum field rendered as its wire string
    pub const fn enum_wire(name: &'static str, path: &'static [&'static str]) -> Self {
        Self {
            name,
            path,
            coercion: Coercion::EnumWire,
        }
    }

    /// Sequence field rendered as repeated `key[]` pairs
    pub const fn repeat(name: &'static str, path: &'static [&'static str]) -> Self {
        Self {
            name,
            path,
            coercion: Coercion::RepeatEach,
        }
    }
}

/// Current value of a query field
pub enum ParamValue<'a> {
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// String
    Str(Cow<'a, str>),
    /// Enum constant, carried as its wire string
    Enum(&'static str),
    /// Ordered sequence; `None` marks a null element
    Seq(Vec<Option<ParamValue<'a>>>),
    /// Nested request object
    Object(&'a dyn QueryParams),
}

impl<'a> ParamValue<'a> {
    /// Wrap an enum constant by its wire string
    pub fn wire<E: Into<&'static str>>(value: E) -> Self {
        Self::Enum(value.into())
    }

    /// Build a sequence from non-null elements
    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ParamValue<'a>>,
    {
        Self::Seq(items.into_iter().map(|item| Some(item.into())).collect())
    }

    /// Build a sequence of enum wire strings
    pub fn wire_seq<I, E>(items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<&'static str>,
    {
        Self::Seq(
            items
                .into_iter()
                .map(|item| Some(Self::Enum(item.into())))
                .collect(),
        )
    }

    /// Short type name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Enum(_) => "enum",
            Self::Seq(_) => "sequence",
            Self::Object(_) => "object",
        }
    }
}

impl std::fmt::Debug for ParamValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Str(v) => f.debug_tuple("Str").field(v).finish(),
            Self::Enum(v) => f.debug_tuple("Enum").field(v).finish(),
            Self::Seq(v) => f.debug_tuple("Seq").field(v).finish(),
            Self::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl From<bool> for ParamValue<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u32> for ParamValue<'_> {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for ParamValue<'_> {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<i32> for ParamValue<'_> {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for ParamValue<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<'a> From<&'a str> for ParamValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for ParamValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for ParamValue<'_> {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

/// A request object that can be rendered as query parameters.
///
/// `field_table` is a static table shared by every instance of the type;
/// `field_values` returns the instance's values in the same order.
pub trait QueryParams {
    /// Field metadata in declaration order
    fn field_table(&self) -> &'static [FieldMeta];

    /// Field values in the order of [`QueryParams::field_table`]; `None` for
    /// unset fields
    fn field_values(&self) -> Vec<Option<ParamValue<'_>>>;
}
