//! Cache client - main entry point for cache-aside operations.

use crate::backend::CacheBackend;
use crate::builder::Builder;
use crate::error::{Error, Result};
use crate::observability::{CacheEvent, CacheMetrics, NoOpMetrics};
use crate::value::CacheValue;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Max time spent waiting for a cache write to complete when no override is
/// configured.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(3);

/// Cache-aside access layer over a [`CacheBackend`].
///
/// [`get`](CacheClient::get) returns the stored value on a hit; on a miss it
/// runs the supplied [`Builder`], hands the built value back immediately, and
/// persists it in a detached task so the caller never waits on the write.
///
/// One client is constructed per logical cache and shared across tasks;
/// cloning is cheap and every clone drives the same backend, metrics sink,
/// and pending-write counter. Configuration is fixed at construction.
///
/// Keys are opaque strings with no namespacing; callers sharing one client
/// across unrelated uses must keep keys unique themselves.
///
/// Concurrent misses on the same key each run the builder and each schedule
/// their own write (no call-coalescing); callers needing single-flight
/// behavior must add it externally.
///
/// # Example
///
/// ```ignore
/// let client = CacheClient::builder(backend)
///     .with_metrics(Box::new(my_metrics))
///     .with_write_timeout(Duration::from_secs(1))
///     .build();
///
/// let mut user = User::default();
/// client.get("user:42", &mut user, &user_builder).await?;
/// ```
pub struct CacheClient<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for CacheClient<S> {
    fn clone(&self) -> Self {
        CacheClient {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<S> {
    storage: S,
    metrics: Box<dyn CacheMetrics>,
    write_timeout: Duration,
    pending_writes: Arc<AtomicI64>,
}

/// Fluent construction for [`CacheClient`].
pub struct CacheClientBuilder<S> {
    storage: S,
    metrics: Box<dyn CacheMetrics>,
    write_timeout: Duration,
}

impl<S: CacheBackend + 'static> CacheClientBuilder<S> {
    fn new(storage: S) -> Self {
        CacheClientBuilder {
            storage,
            metrics: Box::new(NoOpMetrics),
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    /// Set a metrics sink for cache events. Defaults to [`NoOpMetrics`].
    pub fn with_metrics(mut self, metrics: Box<dyn CacheMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Bound the time any single cache write may take. Defaults to
    /// [`DEFAULT_WRITE_TIMEOUT`].
    pub fn with_write_timeout(mut self, write_timeout: Duration) -> Self {
        self.write_timeout = write_timeout;
        self
    }

    pub fn build(self) -> CacheClient<S> {
        CacheClient {
            inner: Arc::new(Inner {
                storage: self.storage,
                metrics: self.metrics,
                write_timeout: self.write_timeout,
                pending_writes: Arc::new(AtomicI64::new(0)),
            }),
        }
    }
}

impl<S: CacheBackend + 'static> CacheClient<S> {
    /// Create a client with default settings (no metrics, 3 second write
    /// timeout).
    pub fn new(storage: S) -> Self {
        Self::builder(storage).build()
    }

    /// Create a builder for custom configuration.
    pub fn builder(storage: S) -> CacheClientBuilder<S> {
        CacheClientBuilder::new(storage)
    }

    /// Retrieve the value for `key` into `dest`, running `builder` on a miss.
    ///
    /// After a successful build the value is returned to the caller
    /// immediately and persisted by a detached write-back task; dropping the
    /// caller's future after `get` returns does not cancel that write, and a
    /// read shortly after a miss may miss again.
    ///
    /// # Errors
    ///
    /// - `Error::BackendError`: the storage read failed (not a miss); the
    ///   builder is never run on this path
    /// - `Error::BuildError`: the builder failed; wraps the cause
    /// - decode errors (`InvalidCacheEntry`, `VersionMismatch`,
    ///   `DeserializationError`): the stored payload is corrupted; the key is
    ///   invalidated best-effort and the error returned
    pub async fn get<V, B>(&self, key: &str, dest: &mut V, builder: &B) -> Result<()>
    where
        V: CacheValue + 'static,
        B: Builder<V> + ?Sized,
    {
        match self.inner.storage.get(key).await {
            Ok(Some(bytes)) => self.on_hit(key, dest, &bytes).await,
            Ok(None) => {
                debug!("cache miss. key: '{}'", key);
                self.inner.metrics.track(CacheEvent::Miss);
                self.on_miss(key, dest, builder).await
            }
            Err(e) => {
                warn!("cache get error. key: '{}' error: {}", key, e);
                self.inner.metrics.track(CacheEvent::GetError);
                Err(e)
            }
        }
    }

    async fn on_miss<V, B>(&self, key: &str, dest: &mut V, builder: &B) -> Result<()>
    where
        V: CacheValue + 'static,
        B: Builder<V> + ?Sized,
    {
        if let Err(cause) = builder.build(key, dest).await {
            warn!("cache miss build error. key: '{}' error: {}", key, cause);
            self.inner.metrics.track(CacheEvent::BuildError);
            return Err(Error::build(cause));
        }

        // The guard is created before the spawn so the write is observable
        // via pending_writes() as soon as get returns.
        let guard = WriteGuard::new(&self.inner.pending_writes);
        let inner = Arc::clone(&self.inner);
        let key = key.to_string();
        let value = dest.clone();
        tokio::spawn(async move {
            inner.write(&key, &value, guard).await;
        });

        Ok(())
    }

    async fn on_hit<V: CacheValue>(&self, key: &str, dest: &mut V, bytes: &[u8]) -> Result<()> {
        if let Err(e) = dest.from_bytes(bytes) {
            warn!("cache hit unmarshal error. key: '{}' error: {}", key, e);
            self.inner.metrics.track(CacheEvent::DeserializeError);

            // drop the bad payload so the next read rebuilds
            let _ = self.invalidate(key).await;

            return Err(e);
        }

        debug!("cache hit. key: '{}'", key);
        self.inner.metrics.track(CacheEvent::Hit);
        Ok(())
    }

    /// Persist `value` under `key`.
    ///
    /// This is exactly the routine the write-back task runs; calling it
    /// directly is rarely needed since `get` schedules it implicitly.
    /// Failures are reported only through logging and metrics — a failed
    /// write is terminal for that attempt, with no retry. The write is
    /// bounded by the configured write timeout.
    pub async fn set<V: CacheValue>(&self, key: &str, value: &V) {
        let guard = WriteGuard::new(&self.inner.pending_writes);
        self.inner.write(key, value, guard).await;
    }

    /// Remove any entry for `key` from storage.
    pub async fn invalidate(&self, key: &str) -> Result<()> {
        if let Err(e) = self.inner.storage.invalidate(key).await {
            warn!("cache invalidate error. key: '{}' error: {}", key, e);
            self.inner.metrics.track(CacheEvent::InvalidateError);
            return Err(e);
        }

        Ok(())
    }

    /// Number of write-backs currently in flight.
    ///
    /// Advisory only: nothing blocks on it and it bounds nothing.
    pub fn pending_writes(&self) -> i64 {
        self.inner.pending_writes.load(Ordering::Relaxed)
    }

    /// Backend reference (for advanced use).
    pub fn storage(&self) -> &S {
        &self.inner.storage
    }
}

impl<S: CacheBackend> Inner<S> {
    /// Serialize and store one value. Holds `_guard` for its whole extent so
    /// the pending-write count drops on every exit path, marshal failures
    /// and unwinding included.
    async fn write<V: CacheValue>(&self, key: &str, value: &V, _guard: WriteGuard) {
        let bytes = match value.to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("cache update marshal error. key: '{}' error: {}", key, e);
                self.metrics.track(CacheEvent::SerializeError);
                return;
            }
        };

        // Fresh timeout, independent of whichever caller triggered this
        // write: the originating get may be long gone.
        match timeout(self.write_timeout, self.storage.set(key, bytes)).await {
            Ok(Ok(())) => {
                debug!("cache updated. key: '{}'", key);
            }
            Ok(Err(e)) => {
                warn!("cache update set error. key: '{}' error: {}", key, e);
                self.metrics.track(CacheEvent::SetError);
            }
            Err(_) => {
                warn!(
                    "cache update timed out. key: '{}' after {:?}",
                    key, self.write_timeout
                );
                self.metrics.track(CacheEvent::SetError);
            }
        }
    }
}

/// Scoped pending-write slot: increments on creation, decrements on drop.
struct WriteGuard(Arc<AtomicI64>);

impl WriteGuard {
    fn new(counter: &Arc<AtomicI64>) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        WriteGuard(Arc::clone(counter))
    }
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}
