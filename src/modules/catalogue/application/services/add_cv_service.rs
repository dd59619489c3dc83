use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::catalogue::application::error::CatalogueError;
use crate::catalogue::application::ports::incoming::{AddCvCommand, AddCvUseCase};
use crate::catalogue::application::ports::outgoing::RecordStore;
use crate::catalogue::domain::entities::CvRecord;
use crate::catalogue::domain::policies::AdmissionPolicy;

pub struct AddCvService {
    store: Arc<dyn RecordStore>,
    policy: AdmissionPolicy,
}

impl AddCvService {
    pub fn new(store: Arc<dyn RecordStore>, policy: AdmissionPolicy) -> Self {
        Self { store, policy }
    }
}

#[async_trait]
impl AddCvUseCase for AddCvService {
    async fn execute(&self, command: AddCvCommand) -> Result<CvRecord, CatalogueError> {
        let admitted = self.policy.admit(command).map_err(|e| {
            warn!(reason = %e, "CV rejected by admission policy");
            e
        })?;

        let record = self.store.add(admitted).await.map_err(|e| {
            error!(backend = %self.store.backend(), error = %e, "Failed to store CV");
            CatalogueError::from(e)
        })?;

        info!(
            cv_id = %record.id,
            backend = %self.store.backend(),
            file_type = %record.file_type,
            "CV added"
        );

        Ok(record)
    }
}
