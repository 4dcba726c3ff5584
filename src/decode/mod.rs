//! Response decoder module
//!
//! Parses JSON response bodies into typed response models.
//!
//! # Overview
//!
//! Failures are split into two classes:
//!
//! - [`Error::Parse`](crate::Error::Parse) for bodies that are not valid JSON
//! - [`Error::SchemaMapping`](crate::Error::SchemaMapping) for valid JSON that
//!   does not fit the target type
//!
//! Input is taken as `&str`, so a missing body cannot reach the decoder; an
//! absent payload has to be handled by the caller before decoding.

mod json;

pub use json::{decode, encode, encode_pretty, JsonDecoder};
