//! JSON decoder implementation

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use serde_json::Value;
use tracing::debug;

/// Decode a JSON body into `T`
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    JsonDecoder::new().decode(body)
}

/// Encode a value as compact JSON
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    JsonDecoder::new().encode(value)
}

/// Encode a value as indented JSON
pub fn encode_pretty<T: Serialize>(value: &T) -> Result<String> {
    JsonDecoder::new().encode_pretty(value)
}

/// Typed JSON decoder with error classification
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }

    /// Decode the body into a typed response
    pub fn decode<T: DeserializeOwned>(&self, body: &str) -> Result<T> {
        serde_json::from_str(body).map_err(|e| {
            debug!(
                "Failed to decode {} ({} bytes): {e}",
                std::any::type_name::<T>(),
                body.len()
            );
            classify(&e)
        })
    }

    /// Decode the body into an untyped JSON value
    pub fn decode_raw(&self, body: &str) -> Result<Value> {
        self.decode(body)
    }

    /// Encode a value as compact JSON
    pub fn encode<T: Serialize>(&self, value: &T) -> Result<String> {
        serde_json::to_string(value).map_err(|e| Error::serialization("<json>", e.to_string()))
    }

    /// Encode a value as indented JSON
    pub fn encode_pretty<T: Serialize>(&self, value: &T) -> Result<String> {
        serde_json::to_string_pretty(value)
            .map_err(|e| Error::serialization("<json>", e.to_string()))
    }
}

fn classify(e: &serde_json::Error) -> Error {
    match e.classify() {
        Category::Data => Error::schema_mapping(format!("Failed to map JSON: {e}")),
        Category::Syntax | Category::Eof | Category::Io => {
            Error::parse(format!("Failed to parse JSON: {e}"))
        }
    }
}
