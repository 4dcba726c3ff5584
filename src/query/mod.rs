//! Query parameter module
//!
//! Renders request graphs as URL query strings using bracket nesting
//! (`search_parameters[filters][template_type_id][]=1`).
//!
//! # Overview
//!
//! Each request type describes its query fields once, in a static table of
//! [`FieldMeta`] entries (key path + coercion rule). At serialization time the
//! type hands over its current values in the same order and the
//! [`QuerySerializer`] walks them depth-first:
//!
//! - unset fields are skipped
//! - scalars are coerced and percent-encoded
//! - sequences emit one `key[]=value` pair per element
//! - nested objects extend the key path

mod serializer;
mod types;

pub use serializer::{append_query, compose_key, to_query_pairs, to_query_string, QuerySerializer};
pub use types::{Coercion, FieldMeta, ParamValue, QueryParams};
