//! In-memory mirror of the stored CV collection.
//!
//! The cache only ever reflects what the store confirmed: a record is
//! appended after `add` returned it and removed after `delete` reported it
//! gone. Every mutation takes `&mut self`, so calls on one cache never
//! interleave.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalogue::application::catalogue::Catalogue;
use crate::catalogue::application::error::CatalogueError;
use crate::catalogue::application::ports::incoming::AddCvCommand;
use crate::catalogue::domain::entities::{CvId, CvRecord, DownloadableFile};
use crate::catalogue::domain::nationality::{Nationality, NationalityRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Removed,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NationalityFilter {
    All,
    Only(String),
}

impl NationalityFilter {
    /// `"all"` (or blank) selects every record, anything else a single code.
    pub fn parse(value: &str) -> Self {
        let code = NationalityRegistry::normalize(value);
        if code.is_empty() || code == "all" {
            NationalityFilter::All
        } else {
            NationalityFilter::Only(code)
        }
    }

    fn matches(&self, record: &CvRecord) -> bool {
        match self {
            NationalityFilter::All => true,
            NationalityFilter::Only(code) => NationalityRegistry::normalize(&record.nationality) == *code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueStats {
    pub total: usize,
    /// One entry per registered nationality, in registry order.
    pub per_nationality: Vec<(Nationality, usize)>,
}

pub struct CollectionCache {
    catalogue: Catalogue,
    records: Vec<CvRecord>,
}

impl CollectionCache {
    pub fn new(catalogue: Catalogue) -> Self {
        Self {
            catalogue,
            records: Vec::new(),
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn records(&self) -> &[CvRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &CvId) -> Option<&CvRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &CvId) -> bool {
        self.get(id).is_some()
    }

    /// Replaces the whole set with the store's current content.
    pub async fn refresh(&mut self) -> Result<(), CatalogueError> {
        let records = self.catalogue.list.execute().await?;
        debug!(count = records.len(), "Collection refreshed");
        self.records = records;
        Ok(())
    }

    /// Adds through the store and appends the confirmed record.
    ///
    /// The store call runs as its own task: dropping the returned future
    /// does not cancel it, the outcome is then simply not reflected here.
    pub async fn add_and_sync(&mut self, command: AddCvCommand) -> Result<CvRecord, CatalogueError> {
        let add = Arc::clone(&self.catalogue.add);

        let record = tokio::spawn(async move { add.execute(command).await })
            .await
            .map_err(|e| CatalogueError::StoreUnavailable(format!("add task failed: {}", e)))??;

        self.records.retain(|r| r.id != record.id);
        self.records.push(record.clone());
        info!(cv_id = %record.id, count = self.records.len(), "CV appended to collection");

        Ok(record)
    }

    /// Deletes through the store and drops the record once the store
    /// confirmed it.
    pub async fn delete_and_sync(&mut self, id: &CvId) -> Result<SyncOutcome, CatalogueError> {
        let delete = Arc::clone(&self.catalogue.delete);
        let target = id.clone();

        let deleted = tokio::spawn(async move { delete.execute(&target).await })
            .await
            .map_err(|e| CatalogueError::StoreUnavailable(format!("delete task failed: {}", e)))??;

        if !deleted {
            warn!(cv_id = %id, "Store has no CV with this id");
            return Ok(SyncOutcome::NotFound);
        }

        self.records.retain(|r| &r.id != id);
        info!(cv_id = %id, count = self.records.len(), "CV removed from collection");
        Ok(SyncOutcome::Removed)
    }

    pub async fn download(&self, record: &CvRecord) -> Result<DownloadableFile, CatalogueError> {
        self.catalogue.download.download(record).await
    }

    pub async fn file_url(&self, record: &CvRecord) -> Result<Option<String>, CatalogueError> {
        self.catalogue.download.file_url(record).await
    }

    pub fn filter(&self, filter: &NationalityFilter) -> Vec<&CvRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    pub fn stats(&self) -> CatalogueStats {
        let per_nationality = self
            .catalogue
            .nationalities()
            .iter()
            .map(|n| {
                let filter = NationalityFilter::Only(n.code.clone());
                let count = self.records.iter().filter(|r| filter.matches(r)).count();
                (n.clone(), count)
            })
            .collect();

        CatalogueStats {
            total: self.records.len(),
            per_nationality,
        }
    }
}
