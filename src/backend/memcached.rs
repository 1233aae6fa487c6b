//! Memcached cache backend implementation.

use super::CacheBackend;
use crate::error::{Error, Result};
use async_memcached::AsciiProtocol;
use async_trait::async_trait;
use deadpool_memcached::{Manager, Pool};
use std::time::Duration;

/// Default Memcached connection pool size.
/// Override with the MEMCACHED_POOL_SIZE environment variable.
const DEFAULT_POOL_SIZE: u32 = 16;

/// Configuration for the Memcached backend.
#[derive(Clone, Debug)]
pub struct MemcachedConfig {
    pub servers: Vec<String>, // e.g., ["localhost:11211", "cache2:11211"]
    pub connection_timeout: Duration,
    pub pool_size: u32,
}

impl Default for MemcachedConfig {
    fn default() -> Self {
        MemcachedConfig {
            servers: vec!["localhost:11211".to_string()],
            connection_timeout: Duration::from_secs(5),
            pool_size: 10,
        }
    }
}

/// Memcached backend with connection pooling and async operations.
///
/// # Example
///
/// ```no_run
/// # use cache_aside::backend::{MemcachedBackend, MemcachedConfig, CacheBackend};
/// # use cache_aside::Result;
/// # async fn example() -> Result<()> {
/// let config = MemcachedConfig {
///     servers: vec!["localhost:11211".to_string()],
///     ..Default::default()
/// };
///
/// let backend = MemcachedBackend::new(config).await?;
/// backend.set("key", b"value".to_vec()).await?;
/// let value = backend.get("key").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MemcachedBackend {
    pool: Pool,
}

impl MemcachedBackend {
    /// Create a new Memcached backend from configuration.
    ///
    /// # Errors
    /// Returns `Err` if connection pool creation fails
    pub async fn new(config: MemcachedConfig) -> Result<Self> {
        // deadpool-memcached Manager takes a single server address
        let addr = config
            .servers
            .first()
            .ok_or_else(|| Error::ConfigError("No memcached servers specified".to_string()))?
            .clone();

        let manager = Manager::new(addr.clone());

        let pool = Pool::builder(manager)
            .max_size(config.pool_size as usize)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to create connection pool: {}", e)))?;

        info!(
            "memcached backend initialized with server: {} (pool size: {})",
            addr, config.pool_size
        );

        Ok(MemcachedBackend { pool })
    }

    /// Create from a server address directly.
    ///
    /// Pool size is taken from the `MEMCACHED_POOL_SIZE` environment
    /// variable when set, otherwise `DEFAULT_POOL_SIZE`.
    ///
    /// # Errors
    /// Returns `Err` if connection pool creation fails
    pub async fn from_server(addr: String) -> Result<Self> {
        let pool_size = std::env::var("MEMCACHED_POOL_SIZE")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_POOL_SIZE);

        let config = MemcachedConfig {
            servers: vec![addr],
            pool_size,
            ..Default::default()
        };
        Self::new(config).await
    }
}

#[async_trait]
impl CacheBackend for MemcachedBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.pool.get().await.map_err(|e| {
            Error::BackendError(format!("Failed to get Memcached connection: {}", e))
        })?;

        match conn.get(key).await {
            Ok(Some(value)) => {
                debug!("memcached GET {} -> HIT", key);
                Ok(value.data)
            }
            Ok(None) => {
                debug!("memcached GET {} -> MISS", key);
                Ok(None)
            }
            Err(e) => Err(Error::BackendError(format!(
                "Memcached GET failed for key {}: {}",
                key, e
            ))),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut conn = self.pool.get().await.map_err(|e| {
            Error::BackendError(format!("Failed to get Memcached connection: {}", e))
        })?;

        // Parameter order: set(key, value, ttl, flags). Expiry is owned by
        // the backend deployment, not this layer.
        conn.set(key, value.as_slice(), None, None)
            .await
            .map_err(|e| {
                Error::BackendError(format!("Memcached SET failed for key {}: {}", key, e))
            })?;

        debug!("memcached SET {}", key);
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<()> {
        let mut conn = self.pool.get().await.map_err(|e| {
            Error::BackendError(format!("Failed to get Memcached connection: {}", e))
        })?;

        if let Err(e) = conn.delete(key).await {
            // Deleting an absent key reports "not found"; that still counts
            // as invalidated.
            let msg = e.to_string();
            if !msg.contains("not found") {
                return Err(Error::BackendError(format!(
                    "Memcached DELETE failed for key {}: {}",
                    key, e
                )));
            }
        }

        debug!("memcached DELETE {}", key);
        Ok(())
    }
}
