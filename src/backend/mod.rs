//! Storage capability and the bundled backend implementations.

use crate::error::Result;
use async_trait::async_trait;

#[cfg(feature = "inmemory")]
mod memory;
#[cfg(feature = "inmemory")]
pub use memory::InMemoryBackend;

#[cfg(feature = "memcached")]
mod memcached;
#[cfg(feature = "memcached")]
pub use memcached::{MemcachedBackend, MemcachedConfig};

/// Storage capability consumed by the cache client.
///
/// Payloads are raw bytes keyed by string; the backend never interprets
/// them. A miss is signalled by `Ok(None)` from `get` — any `Err` is an
/// operational failure and is never treated as an empty cache.
///
/// Implementations must be safe for concurrent use from many tasks; the
/// client performs no locking around them.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetch the payload stored under `key`, or `None` on a miss.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, overwriting any previous payload.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Remove any payload stored under `key`.
    ///
    /// Succeeding on an already-absent key is acceptable.
    async fn invalidate(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<B: CacheBackend + ?Sized> CacheBackend for std::sync::Arc<B> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn invalidate(&self, key: &str) -> Result<()> {
        (**self).invalidate(key).await
    }
}
