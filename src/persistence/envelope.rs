//! Versioned JSON envelope
//!
//! Every saved blob is wrapped as `{"version": N, "data": ...}` so future
//! format changes can be detected instead of misread.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    data: serde_json::Value,
}

/// Wrap and serialize
pub fn encode<T: Serialize>(data: &T) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(&EnvelopeRef {
        version: SAVE_VERSION,
        data,
    })?)
}

/// Check the version and deserialize the payload
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, PersistenceError> {
    let envelope: Envelope = serde_json::from_str(json)?;
    if envelope.version != SAVE_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: envelope.version,
            expected: SAVE_VERSION,
        });
    }
    Ok(serde_json::from_value(envelope.data)?)
}
