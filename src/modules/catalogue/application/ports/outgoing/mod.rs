pub mod key_value_store;
pub mod object_storage;
pub mod record_store;

pub use key_value_store::{KeyValueStore, KeyValueStoreError};
pub use object_storage::{ObjectStorage, ObjectStorageError};
pub use record_store::{BackendKind, RecordStore, RecordStoreError};
