//! Record encoding shared by the store backends.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use irondome_protocols::StoreError;

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(key: &str, text: &str) -> Result<T, StoreError> {
    serde_json::from_str(text).map_err(|e| StoreError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a stored record, treating corruption as absence.
pub(crate) fn decode_lenient<T: DeserializeOwned>(key: &str, text: Option<String>) -> Option<T> {
    let text = text?;
    match decode(key, &text) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring stored record: {}", e);
            None
        }
    }
}
