use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectStorageError {
    #[error("Object not found")]
    NotFound,

    #[error("Access denied")]
    AccessDenied,

    #[error("Object already exists")]
    AlreadyExists,

    #[error("Object storage unavailable: {0}")]
    Unavailable(String),
}

/// Blob storage used by the object-storage backend.
///
/// Paths are object names inside the configured bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads `bytes` as `object_name` and returns the stored object path.
    /// Never replaces an existing object: that is [`ObjectStorageError::AlreadyExists`].
    async fn put_object(
        &self,
        object_name: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<String, ObjectStorageError>;

    async fn delete_object(&self, path: &str) -> Result<(), ObjectStorageError>;

    async fn fetch_object(&self, path: &str) -> Result<Vec<u8>, ObjectStorageError>;

    /// Time-limited (or public) URL for reading the object.
    async fn object_url(&self, path: &str) -> Result<String, ObjectStorageError>;
}
