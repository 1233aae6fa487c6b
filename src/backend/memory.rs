//! In-memory cache backend backed by a concurrent map.

use super::CacheBackend;
use crate::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory backend for tests, examples, and single-process caching.
///
/// Cloning is cheap and every clone shares the same underlying map. There is
/// no eviction and no capacity bound; entries live until invalidated.
///
/// # Example
///
/// ```
/// # use cache_aside::backend::{CacheBackend, InMemoryBackend};
/// # async fn example() -> cache_aside::Result<()> {
/// let backend = InMemoryBackend::new();
/// backend.set("key", b"value".to_vec()).await?;
/// assert!(backend.get("key").await?.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    map: Arc<DashMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        InMemoryBackend {
            map: Arc::new(DashMap::new()),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.map.clear();
    }
}

#[async_trait]
impl CacheBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.map.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.map.insert(key.to_string(), value);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<()> {
        self.map.remove(key);
        Ok(())
    }
}
