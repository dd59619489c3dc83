mod sea_orm_entity;

mod object_record_store_postgres;
pub use object_record_store_postgres::ObjectRecordStorePostgres;

mod gcs_object_storage;
pub use gcs_object_storage::{GcsObjectStorage, DEFAULT_BUCKET};
