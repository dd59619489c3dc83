use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::catalogue::application::ports::outgoing::{
    BackendKind, KeyValueStore, KeyValueStoreError, RecordStore, RecordStoreError,
};
use crate::catalogue::domain::codec;
use crate::catalogue::domain::entities::{CvId, CvRecord, FileContent, FileType};
use crate::catalogue::domain::identity::{IdentityAssigner, TimestampIdentity};
use crate::catalogue::domain::policies::AdmittedCv;

/// Key holding the whole collection as a JSON array.
pub const STORAGE_KEY: &str = "cv_management_data";

/// On-disk shape of one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCv {
    id: String,
    name: String,
    age: u8,
    nationality: String,
    file_name: String,
    file_type: FileType,
    file_data: String,
    upload_date: DateTime<Utc>,
}

impl StoredCv {
    fn to_domain(&self) -> CvRecord {
        CvRecord {
            id: CvId::new(self.id.clone()),
            name: self.name.clone(),
            age: self.age,
            nationality: self.nationality.clone(),
            file_name: self.file_name.clone(),
            file_type: self.file_type,
            file_content: FileContent::Inline(self.file_data.clone()),
            upload_date: self.upload_date,
        }
    }
}

impl From<KeyValueStoreError> for RecordStoreError {
    fn from(err: KeyValueStoreError) -> Self {
        match err {
            KeyValueStoreError::Unavailable(msg) => RecordStoreError::Unavailable(msg),
        }
    }
}

/// Keeps the whole collection under [`STORAGE_KEY`] with inline payloads.
pub struct LocalRecordStore<K>
where
    K: KeyValueStore,
{
    kv: K,
    identity: Arc<dyn IdentityAssigner>,
    // Read-modify-write of the single key must not interleave.
    write_lock: Mutex<()>,
}

impl<K> LocalRecordStore<K>
where
    K: KeyValueStore,
{
    pub fn new(kv: K) -> Self {
        Self::with_identity(kv, Arc::new(TimestampIdentity::new()))
    }

    pub fn with_identity(kv: K, identity: Arc<dyn IdentityAssigner>) -> Self {
        Self {
            kv,
            identity,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<StoredCv>, RecordStoreError> {
        match self.kv.get(STORAGE_KEY).await? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| RecordStoreError::Decode(format!("corrupt {}: {}", STORAGE_KEY, e))),
        }
    }

    async fn save(&self, records: &[StoredCv]) -> Result<(), RecordStoreError> {
        let raw = serde_json::to_string(records).map_err(|e| RecordStoreError::Encode(e.to_string()))?;
        self.kv.set(STORAGE_KEY, &raw).await?;
        Ok(())
    }

    fn fresh_id(&self, existing: &[StoredCv]) -> CvId {
        loop {
            let id = self.identity.next_id();
            if !existing.iter().any(|r| r.id == id.as_str()) {
                return id;
            }
            debug!(cv_id = %id, "Generated id already stored, minting another");
        }
    }
}

#[async_trait]
impl<K> RecordStore for LocalRecordStore<K>
where
    K: KeyValueStore,
{
    fn backend(&self) -> BackendKind {
        BackendKind::Local
    }

    async fn list(&self) -> Result<Vec<CvRecord>, RecordStoreError> {
        Ok(self.load().await?.iter().map(StoredCv::to_domain).collect())
    }

    async fn add(&self, cv: AdmittedCv) -> Result<CvRecord, RecordStoreError> {
        let file_data = codec::encode(cv.bytes(), cv.mime_type());

        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let stored = StoredCv {
            id: self.fresh_id(&records).as_str().to_string(),
            name: cv.name().to_string(),
            age: cv.age(),
            nationality: cv.nationality().to_string(),
            file_name: cv.file_name().to_string(),
            file_type: cv.file_type(),
            file_data,
            upload_date: Utc::now(),
        };

        records.push(stored.clone());
        self.save(&records).await?;

        info!(cv_id = %stored.id, count = records.len(), "CV stored locally");
        Ok(stored.to_domain())
    }

    async fn delete(&self, id: &CvId) -> Result<bool, RecordStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;

        let before = records.len();
        records.retain(|r| r.id != id.as_str());
        if records.len() == before {
            return Ok(false);
        }

        if records.is_empty() {
            // Last record gone: drop the key rather than keep an empty array.
            self.kv.remove(STORAGE_KEY).await?;
        } else {
            self.save(&records).await?;
        }

        info!(cv_id = %id, count = records.len(), "CV deleted locally");
        Ok(true)
    }
}
