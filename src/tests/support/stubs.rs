use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::catalogue::application::ports::outgoing::{BackendKind, RecordStore, RecordStoreError};
use crate::catalogue::domain::codec;
use crate::catalogue::domain::entities::{CvId, CvRecord, DownloadableFile, FileContent};
use crate::catalogue::domain::identity::{IdentityAssigner, TimestampIdentity};
use crate::catalogue::domain::policies::AdmittedCv;

/// In-memory store that behaves like a healthy backend.
#[derive(Default)]
pub struct ScriptedStore {
    records: Mutex<Vec<CvRecord>>,
    identity: TimestampIdentity,
}

impl ScriptedStore {
    pub fn with_records(records: Vec<CvRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            identity: TimestampIdentity::new(),
        }
    }

    pub fn snapshot(&self) -> Vec<CvRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    fn backend(&self) -> BackendKind {
        BackendKind::Local
    }

    async fn list(&self) -> Result<Vec<CvRecord>, RecordStoreError> {
        Ok(self.snapshot())
    }

    async fn add(&self, cv: AdmittedCv) -> Result<CvRecord, RecordStoreError> {
        let record = CvRecord {
            id: self.identity.next_id(),
            name: cv.name().to_string(),
            age: cv.age(),
            nationality: cv.nationality().to_string(),
            file_name: cv.file_name().to_string(),
            file_type: cv.file_type(),
            file_content: FileContent::Inline(codec::encode(cv.bytes(), cv.mime_type())),
            upload_date: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &CvId) -> Result<bool, RecordStoreError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| &r.id != id);
        Ok(records.len() != before)
    }
}

/// Store whose every call fails with the same error.
pub struct FailingStore {
    error: RecordStoreError,
}

impl FailingStore {
    pub fn unavailable(msg: &str) -> Self {
        Self {
            error: RecordStoreError::Unavailable(msg.to_string()),
        }
    }
}

#[async_trait]
impl RecordStore for FailingStore {
    fn backend(&self) -> BackendKind {
        BackendKind::Document
    }

    async fn list(&self) -> Result<Vec<CvRecord>, RecordStoreError> {
        Err(self.error.clone())
    }

    async fn add(&self, _cv: AdmittedCv) -> Result<CvRecord, RecordStoreError> {
        Err(self.error.clone())
    }

    async fn delete(&self, _id: &CvId) -> Result<bool, RecordStoreError> {
        Err(self.error.clone())
    }

    async fn open_file(&self, _record: &CvRecord) -> Result<DownloadableFile, RecordStoreError> {
        Err(self.error.clone())
    }

    async fn file_locator(&self, _record: &CvRecord) -> Result<Option<String>, RecordStoreError> {
        Err(self.error.clone())
    }
}

/// Holds every `add` until the gate is opened, then delegates.
pub struct GatedStore {
    inner: Arc<dyn RecordStore>,
    gate: Arc<Notify>,
}

impl GatedStore {
    pub fn new(inner: Arc<dyn RecordStore>, gate: Arc<Notify>) -> Self {
        Self { inner, gate }
    }
}

#[async_trait]
impl RecordStore for GatedStore {
    fn backend(&self) -> BackendKind {
        self.inner.backend()
    }

    async fn list(&self) -> Result<Vec<CvRecord>, RecordStoreError> {
        self.inner.list().await
    }

    async fn add(&self, cv: AdmittedCv) -> Result<CvRecord, RecordStoreError> {
        self.gate.notified().await;
        self.inner.add(cv).await
    }

    async fn delete(&self, id: &CvId) -> Result<bool, RecordStoreError> {
        self.inner.delete(id).await
    }
}
