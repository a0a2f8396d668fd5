//! JSON codec using `serde_json`.

use crate::error::Result;

/// JSON codec for decoded records.
///
/// Field names are camelCase, matching the names robots use on the wire
/// side (`ballSeenPercentage`, `teammateRoles`, ...).
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a value as compact JSON.
    #[inline]
    pub fn encode<T: serde::Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    /// Encode a value as indented JSON.
    #[inline]
    pub fn encode_pretty<T: serde::Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Decode JSON text to a value.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(text: &str) -> Result<T> {
        Ok(serde_json::from_str(text)?)
    }
}
