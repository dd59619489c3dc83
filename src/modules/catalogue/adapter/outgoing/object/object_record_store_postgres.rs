use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::catalogue::application::ports::outgoing::{
    BackendKind, ObjectStorage, ObjectStorageError, RecordStore, RecordStoreError,
};
use crate::catalogue::domain::entities::{CvId, CvRecord, DownloadableFile, FileContent};
use crate::catalogue::domain::policies::AdmittedCv;

use super::sea_orm_entity::Model as CvModel;

/// `<name>_<millis>_<nonce>.<ext>`, with separators and control characters
/// in the name replaced by `_`. Files without an extension get `bin`.
fn object_name_for(name: &str, file_name: &str, millis: i64, nonce: Uuid) -> String {
    let safe_name: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();

    let ext = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("bin");

    format!("{}_{}_{}.{}", safe_name, millis, nonce.simple(), ext)
}

#[derive(FromQueryResult)]
struct IdResult {
    #[allow(dead_code)]
    id: Uuid,
}

fn storage_error(e: ObjectStorageError) -> RecordStoreError {
    RecordStoreError::Unavailable(e.to_string())
}

fn db_error(e: sea_orm::DbErr) -> RecordStoreError {
    RecordStoreError::Unavailable(e.to_string())
}

/// Object-storage backend: file bytes in a bucket, metadata in `cvs`.
///
/// Add uploads first and removes the blob again if the row cannot be
/// written. Delete removes the blob first, then the row; a blob that is
/// already gone counts as deleted, so retrying a failed delete converges.
#[derive(Clone)]
pub struct ObjectRecordStorePostgres {
    db: Arc<DatabaseConnection>,
    storage: Arc<dyn ObjectStorage>,
}

impl ObjectRecordStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { db, storage }
    }

    async fn find_row(&self, id: Uuid) -> Result<Option<CvModel>, RecordStoreError> {
        CvModel::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"SELECT * FROM cvs WHERE id = $1"#,
            [id.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(db_error)
    }

    /// `Ok(false)` when no row had this id.
    async fn delete_row(&self, id: Uuid) -> Result<bool, sea_orm::DbErr> {
        let deleted = IdResult::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"DELETE FROM cvs WHERE id = $1 RETURNING id"#,
            [id.into()],
        ))
        .one(&*self.db)
        .await?;

        Ok(deleted.is_some())
    }
}

#[async_trait]
impl RecordStore for ObjectRecordStorePostgres {
    fn backend(&self) -> BackendKind {
        BackendKind::ObjectStorage
    }

    async fn list(&self) -> Result<Vec<CvRecord>, RecordStoreError> {
        let rows = CvModel::find_by_statement(Statement::from_string(
            DatabaseBackend::Postgres,
            r#"SELECT * FROM cvs ORDER BY upload_date DESC"#,
        ))
        .all(&*self.db)
        .await
        .map_err(db_error)?;

        rows.iter().map(CvModel::to_domain).collect()
    }

    async fn add(&self, cv: AdmittedCv) -> Result<CvRecord, RecordStoreError> {
        let object_name = object_name_for(
            cv.name(),
            cv.file_name(),
            Utc::now().timestamp_millis(),
            Uuid::new_v4(),
        );

        let file_path = self
            .storage
            .put_object(&object_name, cv.bytes().to_vec(), cv.mime_type())
            .await
            .map_err(|e| {
                error!(object = %object_name, error = %e, "Failed to upload CV file");
                storage_error(e)
            })?;

        let inserted = CvModel::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"INSERT INTO cvs (id, name, age, nationality, file_name, file_type, file_path, upload_date)
               VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, NOW())
               RETURNING *"#,
            [
                cv.name().into(),
                i32::from(cv.age()).into(),
                cv.nationality().into(),
                cv.file_name().into(),
                cv.file_type().as_str().into(),
                file_path.clone().into(),
            ],
        ))
        .one(&*self.db)
        .await;

        let row = match inserted {
            Ok(Some(row)) => row,
            Ok(None) => {
                self.discard_orphan(&file_path).await;
                return Err(RecordStoreError::Unavailable("insert returned no row".to_string()));
            }
            Err(e) => {
                error!(error = %e, "Failed to insert CV metadata");
                self.discard_orphan(&file_path).await;
                return Err(db_error(e));
            }
        };

        let record = match row.to_domain() {
            Ok(record) => record,
            Err(e) => {
                error!(cv_id = %row.id, error = %e, "Inserted CV row is unreadable, rolling back");
                if let Err(db_err) = self.delete_row(row.id).await {
                    warn!(cv_id = %row.id, error = %db_err, "Could not remove unreadable CV row");
                }
                self.discard_orphan(&file_path).await;
                return Err(e);
            }
        };

        info!(cv_id = %record.id, file_path = %file_path, "CV stored in object storage");
        Ok(record)
    }

    async fn delete(&self, id: &CvId) -> Result<bool, RecordStoreError> {
        let Some(uuid) = id.as_uuid() else {
            return Ok(false);
        };

        let Some(row) = self.find_row(uuid).await? else {
            return Ok(false);
        };

        match self.storage.delete_object(&row.file_path).await {
            Ok(()) => {}
            Err(ObjectStorageError::NotFound) => {
                warn!(cv_id = %id, file_path = %row.file_path, "CV file already missing from bucket");
            }
            Err(e) => return Err(storage_error(e)),
        }

        let deleted = self.delete_row(uuid).await.map_err(|e| {
            error!(cv_id = %id, error = %e, "CV file deleted but metadata row remains");
            RecordStoreError::PartialDelete {
                id: id.clone(),
                detail: e.to_string(),
            }
        })?;

        if !deleted {
            warn!(cv_id = %id, "Metadata row vanished during delete");
        }

        info!(cv_id = %id, "CV deleted from object storage");
        Ok(true)
    }

    async fn open_file(&self, record: &CvRecord) -> Result<DownloadableFile, RecordStoreError> {
        let FileContent::Locator(path) = &record.file_content else {
            return Err(RecordStoreError::Decode(format!(
                "record {} has no object path",
                record.id
            )));
        };

        let bytes = self.storage.fetch_object(path).await.map_err(storage_error)?;

        Ok(DownloadableFile {
            bytes,
            mime_type: record.served_mime_type().to_string(),
            suggested_file_name: record.suggested_file_name(),
        })
    }

    async fn file_locator(&self, record: &CvRecord) -> Result<Option<String>, RecordStoreError> {
        match &record.file_content {
            FileContent::Locator(path) => self
                .storage
                .object_url(path)
                .await
                .map(Some)
                .map_err(storage_error),
            FileContent::Inline(payload) => Ok(Some(payload.clone())),
        }
    }
}

impl ObjectRecordStorePostgres {
    async fn discard_orphan(&self, file_path: &str) {
        if let Err(e) = self.storage.delete_object(file_path).await {
            warn!(file_path = %file_path, error = %e, "Could not remove orphaned CV file");
        }
    }
}
