//! Basic usage example of the cache-aside client.

use cache_aside::{
    backend::InMemoryBackend, BoxError, BuilderFn, CacheClient, CacheValue, Result,
};
use serde::{Deserialize, Serialize};

/// Example value: User
#[derive(Clone, Default, Serialize, Deserialize, Debug)]
struct User {
    id: u64,
    name: String,
}

impl CacheValue for User {}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let client = CacheClient::new(InMemoryBackend::new());

    // The builder stands in for the real data source (database, RPC, ...)
    let builder = BuilderFn::new(|key: &str, dest: &mut User| -> std::result::Result<(), BoxError> {
        println!("  [DB] building value for {}", key);
        dest.id = 42;
        dest.name = "Ann".to_string();
        Ok(())
    });

    // First read misses; the builder fills it and the value is persisted
    // in the background.
    let mut user = User::default();
    client.get("user:42", &mut user, &builder).await?;
    println!("first read (miss → build): {:?}", user);

    // Give the detached write-back a moment to land.
    while client.pending_writes() > 0 {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    // Second read hits the cache; the builder is not consulted.
    let mut again = User::default();
    client.get("user:42", &mut again, &builder).await?;
    println!("second read (hit): {:?}", again);

    client.invalidate("user:42").await?;
    println!("invalidated user:42");

    Ok(())
}
