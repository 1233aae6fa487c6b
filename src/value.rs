//! Encodable-value capability implemented by every cacheable type.

use crate::error::Result;
use serde::{de::DeserializeOwned, Serialize};

/// Trait implemented by values stored through the cache.
///
/// The cache never inspects value contents; it only calls `to_bytes` when
/// persisting and `from_bytes` when decoding a hit. `Clone` is required so
/// the freshly built value can be handed to the detached write-back task
/// while the original stays with the caller.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use cache_aside::CacheValue;
///
/// #[derive(Clone, Default, Serialize, Deserialize)]
/// pub struct User {
///     pub id: u64,
///     pub name: String,
/// }
///
/// impl CacheValue for User {}
/// ```
pub trait CacheValue: Send + Sync + Clone + Serialize + DeserializeOwned {
    /// Serialize the value for storage.
    ///
    /// The default wraps the Postcard payload in a versioned envelope; see
    /// `crate::serialization`. Override together with `from_bytes` for a
    /// custom encoding.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        crate::serialization::to_bytes(self)
    }

    /// Populate `self` from a stored payload.
    ///
    /// Validates the envelope's magic header and schema version before
    /// deserializing.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidCacheEntry`: bad magic or truncated envelope
    /// - `Error::VersionMismatch`: schema version changed
    /// - `Error::DeserializationError`: corrupted payload
    fn from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        *self = crate::serialization::from_bytes(bytes)?;
        Ok(())
    }
}

impl<T: CacheValue> CacheValue for Vec<T> {}

impl<T: CacheValue> CacheValue for Option<T> {}
