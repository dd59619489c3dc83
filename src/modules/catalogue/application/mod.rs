pub mod catalogue;
pub mod collection_cache;
pub mod error;
pub mod notice;
pub mod ports;
pub mod services;
