use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::catalogue::application::error::CatalogueError;
use crate::catalogue::application::ports::incoming::DeleteCvUseCase;
use crate::catalogue::application::ports::outgoing::RecordStore;
use crate::catalogue::domain::entities::CvId;

pub struct DeleteCvService {
    store: Arc<dyn RecordStore>,
}

impl DeleteCvService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DeleteCvUseCase for DeleteCvService {
    async fn execute(&self, id: &CvId) -> Result<bool, CatalogueError> {
        let deleted = self.store.delete(id).await.map_err(|e| {
            error!(cv_id = %id, backend = %self.store.backend(), error = %e, "Failed to delete CV");
            CatalogueError::from(e)
        })?;

        if deleted {
            info!(cv_id = %id, backend = %self.store.backend(), "CV deleted");
        } else {
            info!(cv_id = %id, "Delete requested for unknown CV");
        }

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::application::ports::outgoing::{BackendKind, RecordStoreError};
    use crate::catalogue::domain::entities::{CvRecord, DownloadableFile};
    use crate::catalogue::domain::policies::AdmittedCv;
    use mockall::{mock, predicate::*};

    mock! {
        pub Store {}
        #[async_trait]
        impl RecordStore for Store {
            fn backend(&self) -> BackendKind;
            async fn list(&self) -> Result<Vec<CvRecord>, RecordStoreError>;
            async fn add(&self, cv: AdmittedCv) -> Result<CvRecord, RecordStoreError>;
            async fn delete(&self, id: &CvId) -> Result<bool, RecordStoreError>;
            async fn open_file(&self, record: &CvRecord) -> Result<DownloadableFile, RecordStoreError>;
            async fn file_locator(&self, record: &CvRecord) -> Result<Option<String>, RecordStoreError>;
        }
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let mut store = MockStore::new();
        store.expect_backend().return_const(BackendKind::Local);
        store
            .expect_delete()
            .with(eq(CvId::from("abc")))
            .times(1)
            .returning(|_| Ok(true));

        let deleted = DeleteCvService::new(Arc::new(store))
            .execute(&CvId::from("abc"))
            .await
            .unwrap();

        assert!(deleted);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_an_error() {
        let mut store = MockStore::new();
        store.expect_backend().return_const(BackendKind::Local);
        store.expect_delete().times(1).returning(|_| Ok(false));

        let deleted = DeleteCvService::new(Arc::new(store))
            .execute(&CvId::from("nonexistent-id"))
            .await
            .unwrap();

        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_delete_surfaces_partial_delete() {
        let mut store = MockStore::new();
        store.expect_backend().return_const(BackendKind::ObjectStorage);
        store.expect_delete().times(1).returning(|id| {
            Err(RecordStoreError::PartialDelete {
                id: id.clone(),
                detail: "metadata row still present".into(),
            })
        });

        let err = DeleteCvService::new(Arc::new(store))
            .execute(&CvId::from("abc"))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogueError::PartialDelete { .. }));
    }
}
