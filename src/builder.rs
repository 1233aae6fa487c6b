//! Miss-fill capability: produces a fresh value when the cache has none.

use crate::error::BoxError;
use crate::value::CacheValue;
use async_trait::async_trait;

/// Builds the value for a key on a cache miss.
///
/// The client invokes `build` at most once per `get` call and never retries
/// it. Any error is returned to the caller wrapped in
/// [`Error::BuildError`](crate::Error::BuildError) so it stays
/// distinguishable from a storage failure; the cause is the error returned
/// here.
///
/// Implementations must be safe for concurrent use: concurrent misses on the
/// same key each invoke the builder independently (no call-coalescing).
#[async_trait]
pub trait Builder<V: CacheValue>: Send + Sync {
    /// Populate `dest` with the value for `key`.
    async fn build(&self, key: &str, dest: &mut V) -> std::result::Result<(), BoxError>;
}

/// Adapter implementing [`Builder`] for a plain synchronous closure.
///
/// # Example
///
/// ```ignore
/// let builder = BuilderFn::new(|key: &str, dest: &mut User| {
///     dest.id = 42;
///     dest.name = "Ann".to_string();
///     Ok(())
/// });
/// client.get("user:42", &mut user, &builder).await?;
/// ```
///
/// Builders that need to await (database lookups, RPCs) implement
/// [`Builder`] directly instead.
pub struct BuilderFn<F>(F);

impl<F> BuilderFn<F> {
    pub fn new(f: F) -> Self {
        BuilderFn(f)
    }
}

#[async_trait]
impl<V, F> Builder<V> for BuilderFn<F>
where
    V: CacheValue,
    F: Fn(&str, &mut V) -> std::result::Result<(), BoxError> + Send + Sync,
{
    async fn build(&self, key: &str, dest: &mut V) -> std::result::Result<(), BoxError> {
        (self.0)(key, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct TestValue {
        value: String,
    }

    impl CacheValue for TestValue {}

    #[tokio::test]
    async fn test_builder_fn_populates_dest() {
        let builder = BuilderFn::new(|key: &str, dest: &mut TestValue| {
            dest.value = format!("built:{}", key);
            Ok(())
        });

        let mut dest = TestValue::default();
        builder.build("k1", &mut dest).await.unwrap();
        assert_eq!(dest.value, "built:k1");
    }

    #[tokio::test]
    async fn test_builder_fn_propagates_error() {
        let builder = BuilderFn::new(|_key: &str, _dest: &mut TestValue| {
            Err::<(), BoxError>("db unreachable".into())
        });

        let mut dest = TestValue::default();
        let err = builder.build("k1", &mut dest).await.unwrap_err();
        assert_eq!(err.to_string(), "db unreachable");
    }
}
