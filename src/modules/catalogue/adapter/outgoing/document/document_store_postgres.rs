use async_trait::async_trait;
use sea_orm::{DatabaseBackend, DatabaseConnection, FromQueryResult, Statement};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::catalogue::application::ports::outgoing::{BackendKind, RecordStore, RecordStoreError};
use crate::catalogue::domain::codec;
use crate::catalogue::domain::entities::{CvId, CvRecord};
use crate::catalogue::domain::policies::AdmittedCv;

use super::sea_orm_entity::Model as CvDocumentModel;

/// Document-database backend: one `cv_documents` row per CV, file inline.
/// The row's generated UUID is the record id.
#[derive(Debug, Clone)]
pub struct DocumentRecordStorePostgres {
    db: Arc<DatabaseConnection>,
}

impl DocumentRecordStorePostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn delete_row(&self, id: Uuid) -> Result<bool, sea_orm::DbErr> {
        let deleted = IdResult::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"DELETE FROM cv_documents WHERE id = $1 RETURNING id"#,
            [id.into()],
        ))
        .one(&*self.db)
        .await?;

        Ok(deleted.is_some())
    }
}

#[derive(FromQueryResult)]
struct IdResult {
    #[allow(dead_code)]
    id: Uuid,
}

fn db_error(e: sea_orm::DbErr) -> RecordStoreError {
    RecordStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl RecordStore for DocumentRecordStorePostgres {
    fn backend(&self) -> BackendKind {
        BackendKind::Document
    }

    async fn list(&self) -> Result<Vec<CvRecord>, RecordStoreError> {
        let rows = CvDocumentModel::find_by_statement(Statement::from_string(
            DatabaseBackend::Postgres,
            r#"SELECT * FROM cv_documents ORDER BY upload_date ASC"#,
        ))
        .all(&*self.db)
        .await
        .map_err(db_error)?;

        rows.iter().map(CvDocumentModel::to_domain).collect()
    }

    async fn add(&self, cv: AdmittedCv) -> Result<CvRecord, RecordStoreError> {
        let file_data = codec::encode(cv.bytes(), cv.mime_type());

        let row = CvDocumentModel::find_by_statement(Statement::from_sql_and_values(
            DatabaseBackend::Postgres,
            r#"INSERT INTO cv_documents (id, name, age, nationality, file_name, file_type, file_data, upload_date)
               VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, NOW())
               RETURNING *"#,
            [
                cv.name().into(),
                i32::from(cv.age()).into(),
                cv.nationality().into(),
                cv.file_name().into(),
                cv.file_type().as_str().into(),
                file_data.into(),
            ],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to insert CV document");
            db_error(e)
        })?
        .ok_or_else(|| RecordStoreError::Unavailable("insert returned no row".to_string()))?;

        let record = match row.to_domain() {
            Ok(record) => record,
            Err(e) => {
                error!(cv_id = %row.id, error = %e, "Inserted CV document is unreadable, rolling back");
                if let Err(db_err) = self.delete_row(row.id).await {
                    warn!(cv_id = %row.id, error = %db_err, "Could not remove unreadable CV document");
                }
                return Err(e);
            }
        };
        info!(cv_id = %record.id, "CV document inserted");
        Ok(record)
    }

    async fn delete(&self, id: &CvId) -> Result<bool, RecordStoreError> {
        // Ids that are not UUIDs were never issued by this table.
        let Some(uuid) = id.as_uuid() else {
            return Ok(false);
        };

        self.delete_row(uuid).await.map_err(db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::domain::entities::{FileContent, FileType};
    use crate::catalogue::domain::policies::AdmissionPolicy;
    use crate::tests::support::fixtures::{ahmed_command, sample_pdf};
    use chrono::{Duration, Utc};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    fn create_model(id: Uuid, name: &str, file_type: &str) -> CvDocumentModel {
        CvDocumentModel {
            id,
            name: name.to_string(),
            age: 30,
            nationality: "kenya".to_string(),
            file_name: format!("{}.pdf", name.to_lowercase()),
            file_type: file_type.to_string(),
            file_data: codec::encode(&sample_pdf(500), "application/pdf"),
            upload_date: Utc::now().fixed_offset(),
        }
    }

    fn store(db: MockDatabase) -> DocumentRecordStorePostgres {
        DocumentRecordStorePostgres::new(Arc::new(db.into_connection()))
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let first = create_model(Uuid::new_v4(), "Ahmed", "pdf");
        let mut second = create_model(Uuid::new_v4(), "Grace", "image");
        second.upload_date = second.upload_date + Duration::seconds(5);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![first.clone(), second.clone()]]);

        let records = store(db).list().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, CvId::from(first.id));
        assert_eq!(records[0].file_type, FileType::Pdf);
        assert_eq!(records[1].file_type, FileType::Image);
        assert!(matches!(records[0].file_content, FileContent::Inline(_)));
    }

    #[tokio::test]
    async fn test_list_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<CvDocumentModel>::new()]);

        assert!(store(db).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_rejects_corrupt_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![create_model(Uuid::new_v4(), "A", "docx")]]);

        let err = store(db).list().await.unwrap_err();
        assert!(matches!(err, RecordStoreError::Decode(_)));
    }

    #[tokio::test]
    async fn test_add_returns_row_with_database_id() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![create_model(id, "Ahmed", "pdf")]]);

        let cv = AdmissionPolicy::default().admit(ahmed_command()).unwrap();
        let record = store(db).add(cv).await.unwrap();

        assert_eq!(record.id.as_uuid(), Some(id));
        assert_eq!(record.name, "Ahmed");
        assert_eq!(record.file_type, FileType::Pdf);
    }

    #[tokio::test]
    async fn test_add_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("Connection failed".to_string())]);

        let cv = AdmissionPolicy::default().admit(ahmed_command()).unwrap();
        let err = store(db).add(cv).await.unwrap_err();

        assert!(matches!(err, RecordStoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_add_unreadable_row_is_rolled_back() {
        let unreadable = create_model(Uuid::new_v4(), "Ahmed", "docx");
        let conn = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![unreadable.clone()]])
                .append_query_results(vec![vec![unreadable]])
                .into_connection(),
        );
        let store = DocumentRecordStorePostgres::new(Arc::clone(&conn));

        let cv = AdmissionPolicy::default().admit(ahmed_command()).unwrap();
        let err = store.add(cv).await.unwrap_err();
        assert!(matches!(err, RecordStoreError::Decode(_)));

        drop(store);
        let log = Arc::try_unwrap(conn).unwrap().into_transaction_log();
        assert_eq!(log.len(), 2);
        assert!(format!("{:?}", log[1]).contains("DELETE FROM cv_documents"));
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![create_model(id, "Ahmed", "pdf")]]);

        assert!(store(db).delete(&CvId::from(id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_unknown_uuid() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<CvDocumentModel>::new()]);

        assert!(!store(db).delete(&CvId::from(Uuid::new_v4())).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_non_uuid_id_skips_query() {
        // No results queued: any query would fail.
        let db = MockDatabase::new(DatabaseBackend::Postgres);

        assert!(!store(db).delete(&CvId::from("nonexistent-id")).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("Connection lost".to_string())]);

        let err = store(db).delete(&CvId::from(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, RecordStoreError::Unavailable(_)));
    }
}
