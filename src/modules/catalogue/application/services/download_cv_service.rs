use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

use crate::catalogue::application::error::CatalogueError;
use crate::catalogue::application::ports::incoming::DownloadCvUseCase;
use crate::catalogue::application::ports::outgoing::RecordStore;
use crate::catalogue::domain::entities::{CvRecord, DownloadableFile};

pub struct DownloadCvService {
    store: Arc<dyn RecordStore>,
}

impl DownloadCvService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DownloadCvUseCase for DownloadCvService {
    async fn download(&self, record: &CvRecord) -> Result<DownloadableFile, CatalogueError> {
        let file = self.store.open_file(record).await.map_err(|e| {
            error!(cv_id = %record.id, error = %e, "Failed to open CV file");
            CatalogueError::from(e)
        })?;

        debug!(
            cv_id = %record.id,
            size = file.bytes.len(),
            file_name = %file.suggested_file_name,
            "CV file ready for download"
        );
        Ok(file)
    }

    async fn file_url(&self, record: &CvRecord) -> Result<Option<String>, CatalogueError> {
        self.store.file_locator(record).await.map_err(|e| {
            error!(cv_id = %record.id, error = %e, "Failed to resolve CV file URL");
            CatalogueError::from(e)
        })
    }
}
