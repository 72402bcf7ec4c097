use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

/// Cache store shared by every request handler.
pub type SharedCacheStore = Arc<Mutex<Box<dyn CacheStore>>>;

/// Namespace shared by every backend so memory and redis keys line up
const KEY_NAMESPACE: &str = "user_auth";

pub(super) fn cache_key(prefix: &str, key: &str) -> String {
    format!("{KEY_NAMESPACE}:{prefix}:{key}")
}

pub(super) struct CacheEntry {
    pub(super) data: CacheData,
    pub(super) expires_at: DateTime<Utc>,
}

pub struct InMemoryCacheStore {
    pub(super) entry: HashMap<String, CacheEntry>,
}

pub(crate) struct RedisCacheStore {
    pub(super) client: redis::Client,
}

/// Key/value store with expiry used for session records.
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Initialize the store. This is called when the store is created.
    async fn init(&self) -> Result<(), StorageError>;

    /// Put a value into the store, dropping it after `ttl` seconds.
    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError>;

    /// Get a value from the store.
    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError>;

    /// Remove a value from the store.
    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError>;
}
