//! Start-up configuration, read from the environment (optionally via
//! `.env.{RUST_ENV}` / `.env`).

use std::path::PathBuf;
use std::time::Duration;

use crate::catalogue::adapter::outgoing::object::DEFAULT_BUCKET;

pub const DEFAULT_LOCAL_DIR: &str = "./cv_data";
pub const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 900;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalKv {
    File { dir: PathBuf },
    Redis { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Local(LocalKv),
    Document {
        database_url: String,
    },
    ObjectStorage {
        database_url: String,
        bucket: String,
        signed_url_ttl: Duration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueConfig {
    pub backend: BackendConfig,
}

impl CatalogueConfig {
    /// Loads `.env.{RUST_ENV}` (falling back to `.env`) and reads the
    /// process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_env_files();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let backend = match get("CV_BACKEND").as_deref().unwrap_or("local") {
            "local" => {
                let kv = match get("CV_LOCAL_KV").as_deref().unwrap_or("file") {
                    "file" => LocalKv::File {
                        dir: PathBuf::from(
                            get("CV_LOCAL_DIR").unwrap_or_else(|| DEFAULT_LOCAL_DIR.to_string()),
                        ),
                    },
                    "redis" => LocalKv::Redis {
                        url: require("REDIS_URL")?,
                    },
                    other => {
                        return Err(ConfigError::Invalid {
                            var: "CV_LOCAL_KV",
                            value: other.to_string(),
                        })
                    }
                };
                BackendConfig::Local(kv)
            }
            "document" => BackendConfig::Document {
                database_url: require("DATABASE_URL")?,
            },
            "object" => {
                let ttl_secs = match get("CV_SIGNED_URL_TTL_SECS") {
                    None => DEFAULT_SIGNED_URL_TTL_SECS,
                    Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
                        var: "CV_SIGNED_URL_TTL_SECS",
                        value: raw.clone(),
                    })?,
                };

                BackendConfig::ObjectStorage {
                    database_url: require("DATABASE_URL")?,
                    bucket: get("CV_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                    signed_url_ttl: Duration::from_secs(ttl_secs),
                }
            }
            other => {
                return Err(ConfigError::Invalid {
                    var: "CV_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self { backend })
    }
}

fn load_env_files() {
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }
}
