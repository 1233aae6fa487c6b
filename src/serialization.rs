//! Versioned binary envelope for cached payloads.
//!
//! Every value is stored as:
//!
//! ```text
//! [MAGIC: 4 bytes] [VERSION: 4 bytes LE] [POSTCARD PAYLOAD]
//! ```
//!
//! The magic header lets the cache reject foreign or corrupted entries before
//! attempting deserialization, and the version field turns schema drift into
//! a clean [`Error::VersionMismatch`] instead of a garbage decode.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

const MAGIC: &[u8; 4] = b"CASD";
const SCHEMA_VERSION: u32 = 1;
const HEADER_LEN: usize = 8;

/// Serialize a value into an enveloped byte buffer.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let payload =
        postcard::to_allocvec(value).map_err(|e| Error::SerializationError(e.to_string()))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Deserialize a value from an enveloped byte buffer.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::InvalidCacheEntry(format!(
            "payload too short: {} bytes",
            bytes.len()
        )));
    }

    if &bytes[..4] != MAGIC {
        return Err(Error::InvalidCacheEntry("bad magic header".to_string()));
    }

    let found = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if found != SCHEMA_VERSION {
        return Err(Error::VersionMismatch {
            expected: SCHEMA_VERSION,
            found,
        });
    }

    postcard::from_bytes(&bytes[HEADER_LEN..])
        .map_err(|e| Error::DeserializationError(e.to_string()))
}
