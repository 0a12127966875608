//! LRU TTL Cache - demo entry point
//!
//! Fills a small cache past capacity, reads back a few keys, then waits for
//! the TTL to pass and reads again to show expiration.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_ttl_cache::{Cache, CacheConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lru_ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: capacity={}, ttl={:?}, cleanup_interval={:?}",
        config.capacity, config.ttl, config.cleanup_interval
    );

    let cache: Cache<String, String> =
        Cache::from_config(&config).context("failed to create cache")?;

    for (key, value) in [
        ("1", "Physics"),
        ("2", "Math"),
        ("3", "Astronomy"),
        ("4", "Linear algebra"),
    ] {
        cache.put(key.to_string(), value.to_string());
    }

    info!("get(2) = {:?}", cache.get(&"2".to_string()));
    info!("get(1) = {:?}", cache.get(&"1".to_string()));

    tokio::time::sleep(config.ttl.saturating_mul(2)).await;

    info!("get(2) after ttl = {:?}", cache.get(&"2".to_string()));
    info!("Entries remaining: {}", cache.len());

    Ok(())
}
