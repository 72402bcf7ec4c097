use std::{env, sync::Arc, sync::LazyLock};
use tokio::sync::Mutex;

use crate::storage::errors::StorageError;

use super::types::{CacheStore, InMemoryCacheStore, RedisCacheStore, SharedCacheStore};

static GENERIC_CACHE_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_CACHE_STORE_TYPE").unwrap_or_else(|_| "memory".to_string())
});

static GENERIC_CACHE_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_CACHE_STORE_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
});

/// Build the cache store selected by `GENERIC_CACHE_STORE_TYPE`.
pub async fn cache_store_from_env() -> Result<SharedCacheStore, StorageError> {
    let store = build_cache_store(
        GENERIC_CACHE_STORE_TYPE.as_str(),
        GENERIC_CACHE_STORE_URL.as_str(),
    )?;
    store.init().await?;
    Ok(Arc::new(Mutex::new(store)))
}

fn build_cache_store(store_type: &str, store_url: &str) -> Result<Box<dyn CacheStore>, StorageError> {
    tracing::info!(
        "Initializing cache store with type: {}, url: {}",
        store_type,
        store_url
    );

    match store_type {
        "memory" => Ok(Box::new(InMemoryCacheStore::new())),
        "redis" => {
            let client = redis::Client::open(store_url).map_err(|e| {
                tracing::error!("Failed to create Redis client: {}", e);
                StorageError::from(e)
            })?;
            Ok(Box::new(RedisCacheStore { client }))
        }
        t => Err(StorageError::Config(format!(
            "Unsupported cache store type: {t}. Supported types are 'memory' and 'redis'"
        ))),
    }
}
