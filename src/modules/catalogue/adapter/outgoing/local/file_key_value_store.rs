use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::catalogue::application::ports::outgoing::{KeyValueStore, KeyValueStoreError};

/// One JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.root.join(format!("{}.json", file_name))
    }
}

fn io_error(e: std::io::Error) -> KeyValueStoreError {
    KeyValueStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        fs::create_dir_all(&self.root).await.map_err(io_error)?;

        // Atomic write
        let tmp_path = self.root.join(format!(".kv-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, value).await.map_err(io_error)?;
        if let Err(e) = fs::rename(&tmp_path, self.path_for(key)).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(io_error(e));
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }
}
