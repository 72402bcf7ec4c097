use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheEntry, CacheStore, InMemoryCacheStore, cache_key};

impl InMemoryCacheStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory generic cache store");
        Self {
            entry: HashMap::new(),
        }
    }

    fn purge_expired(&mut self) {
        let now = Utc::now();
        self.entry.retain(|_, entry| entry.expires_at > now);
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        self.purge_expired();
        let key = cache_key(prefix, key);
        let ttl = i64::try_from(ttl).map_err(|e| StorageError::Storage(e.to_string()))?;
        self.entry.insert(
            key,
            CacheEntry {
                data: value,
                expires_at: Utc::now() + Duration::seconds(ttl),
            },
        );
        Ok(())
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let key = cache_key(prefix, key);
        let now = Utc::now();
        Ok(self
            .entry
            .get(&key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.data.clone()))
    }

    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError> {
        let key = cache_key(prefix, key);
        self.entry.remove(&key);
        Ok(())
    }
}
