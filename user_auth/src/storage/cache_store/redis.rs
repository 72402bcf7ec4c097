use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheStore, RedisCacheStore, cache_key};

impl RedisCacheStore {
    async fn connection(&self) -> Result<MultiplexedConnection, StorageError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                tracing::error!("Redis connection failed: {}", e);
                StorageError::from(e)
            })
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    /// Fails early when the server cannot be reached.
    async fn init(&self) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        tracing::info!("Connected to redis cache store");
        Ok(())
    }

    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let seconds = u64::try_from(ttl).map_err(|e| StorageError::Storage(e.to_string()))?;
        let encoded = serde_json::to_string(&value)?;

        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(cache_key(prefix, key), encoded, seconds).await?;
        Ok(())
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(cache_key(prefix, key)).await?;

        raw.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(StorageError::from)
    }

    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        let _: () = conn.del(cache_key(prefix, key)).await?;
        Ok(())
    }
}
