//! Depth-first query string serializer

use super::types::{Coercion, FieldMeta, ParamValue, QueryParams};
use crate::deep_clone::MAX_GRAPH_DEPTH;
use crate::error::{Error, Result};
use url::Url;

/// Serialize a request object into an encoded query string
pub fn to_query_string(root: &dyn QueryParams) -> Result<String> {
    QuerySerializer::new().serialize(root)
}

/// Serialize a request object into raw (unencoded) key/value pairs
pub fn to_query_pairs(root: &dyn QueryParams) -> Result<Vec<(String, String)>> {
    QuerySerializer::new().pairs(root)
}

/// Compose a bracketed key from a prefix and path segments.
///
/// The first segment is used verbatim when the prefix is empty; every other
/// segment is wrapped in brackets.
pub fn compose_key(prefix: &str, path: &[&str]) -> String {
    let mut key = String::with_capacity(prefix.len() + path.iter().map(|s| s.len() + 2).sum::<usize>());
    key.push_str(prefix);
    for segment in path {
        if key.is_empty() {
            key.push_str(segment);
        } else {
            key.push('[');
            key.push_str(segment);
            key.push(']');
        }
    }
    key
}

/// Append an encoded query string to an endpoint URL
pub fn append_query(endpoint: &str, query: &str) -> Result<String> {
    Url::parse(endpoint)?;
    if query.is_empty() {
        return Ok(endpoint.to_string());
    }
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    Ok(format!("{endpoint}{separator}{query}"))
}

/// Walks a request graph and emits `key=value` pairs
#[derive(Debug, Clone)]
pub struct QuerySerializer {
    max_depth: usize,
}

impl Default for QuerySerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl QuerySerializer {
    /// Create a serializer with the default nesting limit
    pub fn new() -> Self {
        Self {
            max_depth: MAX_GRAPH_DEPTH,
        }
    }

    /// Set the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Serialize into `k1=v1&k2=v2`, values percent-encoded, keys verbatim
    pub fn serialize(&self, root: &dyn QueryParams) -> Result<String> {
        let pairs = self.pairs(root)?;
        Ok(pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&"))
    }

    /// Serialize into raw pairs in declaration order
    pub fn pairs(&self, root: &dyn QueryParams) -> Result<Vec<(String, String)>> {
        let mut out = Vec::new();
        self.walk(root, "", 0, &mut out)?;
        Ok(out)
    }

    fn walk(
        &self,
        object: &dyn QueryParams,
        prefix: &str,
        depth: usize,
        out: &mut Vec<(String, String)>,
    ) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::cyclic(if prefix.is_empty() { "<root>" } else { prefix }));
        }

        let table = object.field_table();
        let values = object.field_values();
        if table.len() != values.len() {
            return Err(Error::serialization(
                if prefix.is_empty() { "<root>" } else { prefix },
                format!(
                    "field table has {} entries but {} values were supplied",
                    table.len(),
                    values.len()
                ),
            ));
        }

        for (meta, value) in table.iter().zip(values) {
            let Some(value) = value else {
                continue;
            };
            let key = compose_key(prefix, meta.path);
            self.emit(meta, key, value, depth, out)?;
        }
        Ok(())
    }

    fn emit(
        &self,
        meta: &FieldMeta,
        key: String,
        value: ParamValue<'_>,
        depth: usize,
        out: &mut Vec<(String, String)>,
    ) -> Result<()> {
        match (meta.coercion, value) {
            (Coercion::Identity, ParamValue::Object(nested)) => {
                self.walk(nested, &key, depth + 1, out)
            }
            (Coercion::RepeatEach, ParamValue::Seq(items)) => {
                let repeated = format!("{key}[]");
                for (i, item) in items.into_iter().enumerate() {
                    let item = item.ok_or_else(|| {
                        Error::serialization(meta.name, format!("element {i} is null"))
                    })?;
                    out.push((repeated.clone(), render_scalar(meta, item)?));
                }
                Ok(())
            }
            (Coercion::RepeatEach, other) => Err(mismatch(meta, "a sequence", &other)),
            (_, seq @ ParamValue::Seq(_)) => Err(Error::serialization(
                meta.name,
                format!("{} value requires the repeat rule", seq.kind()),
            )),
            (Coercion::BoolToInt, ParamValue::Bool(flag)) => {
                out.push((key, if flag { "1" } else { "0" }.to_string()));
                Ok(())
            }
            (Coercion::BoolToInt, other) => Err(mismatch(meta, "a boolean", &other)),
            (Coercion::EnumWire, ParamValue::Enum(wire)) => {
                out.push((key, wire.to_string()));
                Ok(())
            }
            (Coercion::EnumWire, other) => Err(mismatch(meta, "an enum", &other)),
            (Coercion::Identity, scalar) => {
                out.push((key, render_scalar(meta, scalar)?));
                Ok(())
            }
        }
    }
}

fn render_scalar(meta: &FieldMeta, value: ParamValue<'_>) -> Result<String> {
    match value {
        ParamValue::Bool(flag) => Ok(flag.to_string()),
        ParamValue::Int(n) => Ok(n.to_string()),
        ParamValue::UInt(n) => Ok(n.to_string()),
        ParamValue::Float(n) => Ok(n.to_string()),
        ParamValue::Str(s) => Ok(s.into_owned()),
        ParamValue::Enum(wire) => Ok(wire.to_string()),
        other => Err(mismatch(meta, "a scalar", &other)),
    }
}

fn mismatch(meta: &FieldMeta, expected: &str, found: &ParamValue<'_>) -> Error {
    Error::serialization(
        meta.name,
        format!(
            "{:?} rule expects {expected}, found {}",
            meta.coercion,
            found.kind()
        ),
    )
}
