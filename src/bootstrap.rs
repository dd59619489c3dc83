use deadpool_redis::{Config, Runtime};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::catalogue::adapter::outgoing::document::DocumentRecordStorePostgres;
use crate::catalogue::adapter::outgoing::local::{
    FileKeyValueStore, LocalRecordStore, RedisKeyValueStore,
};
use crate::catalogue::adapter::outgoing::object::{GcsObjectStorage, ObjectRecordStorePostgres};
use crate::catalogue::application::catalogue::Catalogue;
use crate::catalogue::application::ports::outgoing::RecordStore;
use crate::catalogue::domain::policies::AdmissionPolicy;
use crate::config::{BackendConfig, CatalogueConfig, ConfigError, LocalKv};

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to connect to database: {0}")]
    Database(String),

    #[error("Failed to create Redis pool: {0}")]
    Redis(String),
}

async fn connect_database(database_url: &str) -> Result<Arc<DatabaseConnection>, BootstrapError> {
    let mut opt = ConnectOptions::new(database_url.to_string());
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .map_err(|e| BootstrapError::Database(e.to_string()))?;

    Ok(Arc::new(conn))
}

/// Builds the record store selected by `config`.
pub async fn build_record_store(
    config: &CatalogueConfig,
) -> Result<Arc<dyn RecordStore>, BootstrapError> {
    let store: Arc<dyn RecordStore> = match &config.backend {
        BackendConfig::Local(LocalKv::File { dir }) => {
            info!(dir = %dir.display(), "Using local file storage");
            Arc::new(LocalRecordStore::new(FileKeyValueStore::new(dir.clone())))
        }
        BackendConfig::Local(LocalKv::Redis { url }) => {
            let pool = Config::from_url(url)
                .create_pool(Some(Runtime::Tokio1))
                .map_err(|e| BootstrapError::Redis(e.to_string()))?;
            info!("Using local storage on Redis");
            Arc::new(LocalRecordStore::new(RedisKeyValueStore::new(Arc::new(pool))))
        }
        BackendConfig::Document { database_url } => {
            let db = connect_database(database_url).await?;
            info!("Using document database storage");
            Arc::new(DocumentRecordStorePostgres::new(db))
        }
        BackendConfig::ObjectStorage {
            database_url,
            bucket,
            signed_url_ttl,
        } => {
            let db = connect_database(database_url).await?;
            let storage = GcsObjectStorage::new(bucket.clone(), Some(*signed_url_ttl));
            info!(bucket = %bucket, "Using object storage");
            Arc::new(ObjectRecordStorePostgres::new(db, Arc::new(storage)))
        }
    };

    Ok(store)
}

/// Wires the configured backend into the catalogue use cases.
pub async fn build_catalogue(config: &CatalogueConfig) -> Result<Catalogue, BootstrapError> {
    let store = build_record_store(config).await?;
    let catalogue = Catalogue::new(store, AdmissionPolicy::default());
    info!(backend = %catalogue.backend(), "CV catalogue ready");
    Ok(catalogue)
}
