use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyValueStoreError {
    #[error("Key-value store unavailable: {0}")]
    Unavailable(String),
}

/// Namespaced string storage, the persistence primitive of the local backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}
