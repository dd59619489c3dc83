use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error};

use crate::catalogue::application::error::CatalogueError;
use crate::catalogue::application::ports::incoming::ListCvsUseCase;
use crate::catalogue::application::ports::outgoing::RecordStore;
use crate::catalogue::domain::entities::CvRecord;

pub struct ListCvsService {
    store: Arc<dyn RecordStore>,
}

impl ListCvsService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ListCvsUseCase for ListCvsService {
    async fn execute(&self) -> Result<Vec<CvRecord>, CatalogueError> {
        let records = self.store.list().await.map_err(|e| {
            error!(backend = %self.store.backend(), error = %e, "Failed to list CVs");
            CatalogueError::from(e)
        })?;

        debug!(count = records.len(), backend = %self.store.backend(), "CVs loaded");
        Ok(records)
    }
}
