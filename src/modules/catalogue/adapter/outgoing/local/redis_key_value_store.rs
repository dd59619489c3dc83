use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;

use crate::catalogue::application::ports::outgoing::{KeyValueStore, KeyValueStoreError};

/// Redis-backed key-value store.
///
/// ```text
/// cv_catalogue:{key} -> "<value>"
/// ```
#[derive(Clone)]
pub struct RedisKeyValueStore {
    pool: Arc<Pool>,
}

impl RedisKeyValueStore {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn redis_key(key: &str) -> String {
        format!("cv_catalogue:{key}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, KeyValueStoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| KeyValueStoreError::Unavailable(format!("Pool error: {}", e)))
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let mut conn = self.get_conn().await?;

        conn.get::<_, Option<String>>(Self::redis_key(key))
            .await
            .map_err(|e| KeyValueStoreError::Unavailable(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let mut conn = self.get_conn().await?;

        conn.set::<_, _, ()>(Self::redis_key(key), value)
            .await
            .map_err(|e| KeyValueStoreError::Unavailable(e.to_string()))
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let mut conn = self.get_conn().await?;

        conn.del::<_, ()>(Self::redis_key(key))
            .await
            .map_err(|e| KeyValueStoreError::Unavailable(e.to_string()))
    }
}
