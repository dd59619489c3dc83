use async_trait::async_trait;

use crate::catalogue::application::error::CatalogueError;
use crate::catalogue::domain::entities::{CvCandidate, CvId, CvRecord, DownloadableFile};

/// Name, age, nationality and file as collected by the upload form.
pub type AddCvCommand = CvCandidate;

#[async_trait]
pub trait ListCvsUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<CvRecord>, CatalogueError>;
}

#[async_trait]
pub trait AddCvUseCase: Send + Sync {
    /// Validates the command before touching the store.
    async fn execute(&self, command: AddCvCommand) -> Result<CvRecord, CatalogueError>;
}

#[async_trait]
pub trait DeleteCvUseCase: Send + Sync {
    /// `Ok(false)` when the id is unknown.
    async fn execute(&self, id: &CvId) -> Result<bool, CatalogueError>;
}

#[async_trait]
pub trait DownloadCvUseCase: Send + Sync {
    async fn download(&self, record: &CvRecord) -> Result<DownloadableFile, CatalogueError>;

    async fn file_url(&self, record: &CvRecord) -> Result<Option<String>, CatalogueError>;
}
