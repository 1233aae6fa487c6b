//! Metrics capability and the no-op default.
//!
//! Logging goes through the `log` facade: with no logger installed, every
//! macro call is discarded, which gives the same silent default as
//! [`NoOpMetrics`] does for metrics.

/// Cache event kinds trackable by a metrics sink.
///
/// Exactly one of `Hit`, `Miss`, `GetError`, `BuildError` or
/// `DeserializeError` is recorded per `get` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheEvent {
    Hit,
    Miss,
    GetError,
    BuildError,
    DeserializeError,
    SetError,
    SerializeError,
    InvalidateError,
}

impl CacheEvent {
    /// Kebab-case metric name, suitable as a counter label.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheEvent::Hit => "hit",
            CacheEvent::Miss => "miss",
            CacheEvent::GetError => "get-error",
            CacheEvent::BuildError => "build-error",
            CacheEvent::DeserializeError => "unmarshal-error",
            CacheEvent::SetError => "set-error",
            CacheEvent::SerializeError => "marshal-error",
            CacheEvent::InvalidateError => "invalidate-error",
        }
    }
}

impl std::fmt::Display for CacheEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics sink for cache events.
///
/// Implementations must be cheap and non-blocking; the client calls `track`
/// inline on every operation and never inspects a result.
pub trait CacheMetrics: Send + Sync {
    fn track(&self, event: CacheEvent);
}

/// Default metrics sink that discards every event.
///
/// Selected once at client construction so call sites never branch on
/// whether a sink was configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl CacheMetrics for NoOpMetrics {
    fn track(&self, _event: CacheEvent) {}
}
