//! # cache-aside
//!
//! A backend-agnostic cache-aside access layer with asynchronous write-back.
//!
//! ## Features
//!
//! - **Cache-aside:** on a miss the caller-supplied [`Builder`] produces the
//!   value, which is returned immediately and persisted off the critical path
//! - **Backend agnostic:** in-memory, Memcached, or any custom
//!   [`CacheBackend`]
//! - **Detached write-back:** writes run under their own timeout, independent
//!   of the triggering caller's cancellation
//! - **Failure taxonomy:** build failures stay distinguishable from storage
//!   failures; corrupted entries are invalidated best-effort
//! - **Observable:** every outcome emits a [`CacheEvent`]; logging goes
//!   through the `log` facade
//!
//! ## Quick Start
//!
//! ```ignore
//! use cache_aside::{backend::InMemoryBackend, BuilderFn, CacheClient, CacheValue};
//! use serde::{Deserialize, Serialize};
//!
//! // 1. Define your value type
//! #[derive(Clone, Default, Serialize, Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! impl CacheValue for User {}
//!
//! // 2. Create a client over a backend
//! let client = CacheClient::new(InMemoryBackend::new());
//!
//! // 3. Read through it; the builder fills misses
//! let builder = BuilderFn::new(|key: &str, dest: &mut User| {
//!     dest.id = 42;
//!     dest.name = "Ann".to_string();
//!     Ok(())
//! });
//!
//! let mut user = User::default();
//! client.get("user:42", &mut user, &builder).await?;
//! ```
//!
//! Concurrent misses on one key each run the builder (no single-flight);
//! layer call-coalescing on top if you need it.

#[macro_use]
extern crate log;

pub mod backend;
pub mod builder;
pub mod client;
pub mod error;
pub mod observability;
pub mod serialization;
pub mod value;

// Re-exports for convenience
pub use backend::CacheBackend;
pub use builder::{Builder, BuilderFn};
pub use client::{CacheClient, CacheClientBuilder, DEFAULT_WRITE_TIMEOUT};
pub use error::{BoxError, Error, Result};
pub use observability::{CacheEvent, CacheMetrics, NoOpMetrics};
pub use value::CacheValue;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
