use async_trait::async_trait;
use std::fmt;

use crate::catalogue::domain::codec::{self, CodecError};
use crate::catalogue::domain::entities::{CvId, CvRecord, DownloadableFile, FileContent};
use crate::catalogue::domain::policies::AdmittedCv;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordStoreError {
    #[error("Failed to encode file: {0}")]
    Encode(String),

    #[error("Stored record could not be decoded: {0}")]
    Decode(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The blob is gone but the metadata row survived.
    #[error("CV {id} was only partially deleted: {detail}")]
    PartialDelete { id: CvId, detail: String },
}

impl From<CodecError> for RecordStoreError {
    fn from(err: CodecError) -> Self {
        RecordStoreError::Decode(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Local,
    Document,
    ObjectStorage,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BackendKind::Local => "local",
            BackendKind::Document => "document",
            BackendKind::ObjectStorage => "object_storage",
        };
        write!(f, "{}", s)
    }
}

/// Durable home of the CV collection.
///
/// Exactly one implementation is selected at start-up. Implementations must
/// never expose a half-written record: `add` either returns the stored record
/// or leaves the store as it was.
#[async_trait]
pub trait RecordStore: Send + Sync {
    fn backend(&self) -> BackendKind;

    /// Every stored record. An empty store is `Ok(vec![])`.
    async fn list(&self) -> Result<Vec<CvRecord>, RecordStoreError>;

    /// Persists an admitted CV and returns it with its assigned id and
    /// upload date.
    async fn add(&self, cv: AdmittedCv) -> Result<CvRecord, RecordStoreError>;

    /// `Ok(false)` when no record has this id.
    async fn delete(&self, id: &CvId) -> Result<bool, RecordStoreError>;

    /// Raw bytes of the record's file.
    async fn open_file(&self, record: &CvRecord) -> Result<DownloadableFile, RecordStoreError> {
        match &record.file_content {
            FileContent::Inline(payload) => {
                let decoded = codec::decode(payload)?;
                Ok(DownloadableFile {
                    bytes: decoded.bytes,
                    mime_type: decoded.mime_type,
                    suggested_file_name: record.suggested_file_name(),
                })
            }
            FileContent::Locator(path) => Err(RecordStoreError::Decode(format!(
                "record {} points at '{}', which this store cannot open",
                record.id, path
            ))),
        }
    }

    /// URL a browser can open to preview the file, if the store can give one.
    async fn file_locator(&self, record: &CvRecord) -> Result<Option<String>, RecordStoreError> {
        match &record.file_content {
            FileContent::Inline(payload) => Ok(Some(payload.clone())),
            FileContent::Locator(_) => Ok(None),
        }
    }
}
