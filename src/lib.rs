pub mod modules;
pub use modules::catalogue;

pub mod bootstrap;
pub mod config;
pub mod telemetry;

pub use bootstrap::build_catalogue;
pub use catalogue::application::catalogue::Catalogue;
pub use catalogue::application::collection_cache::CollectionCache;
pub use catalogue::application::error::CatalogueError;
pub use config::CatalogueConfig;

#[cfg(test)]
mod tests;
