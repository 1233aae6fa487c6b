//! Error types for cache operations.

use thiserror::Error;

/// Boxed error type used for builder failure causes.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors surfaced by the cache layer.
///
/// `BuildError` is deliberately distinct from `BackendError` so callers can
/// tell "the data source failed" apart from "the cache failed". The cause of
/// a build failure is available through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum Error {
    /// Storage backend failed for a reason other than a plain miss.
    #[error("backend error: {0}")]
    BackendError(String),

    /// The miss-fill builder failed; wraps the underlying cause.
    #[error("cache miss build error: {source}")]
    BuildError {
        #[source]
        source: BoxError,
    },

    /// Value could not be serialized for storage.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Stored payload could not be deserialized into the target type.
    #[error("deserialization error: {0}")]
    DeserializationError(String),

    /// Stored payload is not a valid cache envelope (bad magic or truncated).
    #[error("invalid cache entry: {0}")]
    InvalidCacheEntry(String),

    /// Stored payload was written with a different schema version.
    #[error("cache schema version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    /// Backend configuration is invalid.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Wrap a builder failure, preserving the original cause.
    pub fn build(source: impl Into<BoxError>) -> Self {
        Error::BuildError {
            source: source.into(),
        }
    }

    /// True for any of the decode-failure variants, which the client treats
    /// as corrupted cache content.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Error::DeserializationError(_)
                | Error::InvalidCacheEntry(_)
                | Error::VersionMismatch { .. }
        )
    }
}
