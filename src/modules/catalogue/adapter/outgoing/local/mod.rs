mod file_key_value_store;
pub use file_key_value_store::FileKeyValueStore;

mod memory_key_value_store;
pub use memory_key_value_store::MemoryKeyValueStore;

mod redis_key_value_store;
pub use redis_key_value_store::RedisKeyValueStore;

mod local_record_store;
pub use local_record_store::{LocalRecordStore, STORAGE_KEY};
