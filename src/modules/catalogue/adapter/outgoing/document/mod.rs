mod sea_orm_entity;

mod document_store_postgres;
pub use document_store_postgres::DocumentRecordStorePostgres;
