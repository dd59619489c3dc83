use std::sync::Arc;

use crate::catalogue::application::ports::incoming::{
    AddCvUseCase, DeleteCvUseCase, DownloadCvUseCase, ListCvsUseCase,
};
use crate::catalogue::application::ports::outgoing::{BackendKind, RecordStore};
use crate::catalogue::application::services::{
    AddCvService, DeleteCvService, DownloadCvService, ListCvsService,
};
use crate::catalogue::domain::nationality::NationalityRegistry;
use crate::catalogue::domain::policies::AdmissionPolicy;

/// Use cases wired to one record store, handed to the presentation layer.
#[derive(Clone)]
pub struct Catalogue {
    pub list: Arc<dyn ListCvsUseCase + Send + Sync>,
    pub add: Arc<dyn AddCvUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteCvUseCase + Send + Sync>,
    pub download: Arc<dyn DownloadCvUseCase + Send + Sync>,
    nationalities: NationalityRegistry,
    backend: BackendKind,
}

impl Catalogue {
    pub fn new(store: Arc<dyn RecordStore>, policy: AdmissionPolicy) -> Self {
        let nationalities = policy.nationalities.clone();
        let backend = store.backend();

        Self {
            list: Arc::new(ListCvsService::new(Arc::clone(&store))),
            add: Arc::new(AddCvService::new(Arc::clone(&store), policy)),
            delete: Arc::new(DeleteCvService::new(Arc::clone(&store))),
            download: Arc::new(DownloadCvService::new(store)),
            nationalities,
            backend,
        }
    }

    /// Nationalities accepted on upload, in display order.
    pub fn nationalities(&self) -> &NationalityRegistry {
        &self.nationalities
    }

    pub fn backend(&self) -> BackendKind {
        self.backend
    }
}
