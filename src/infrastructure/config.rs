use std::str::FromStr;

use crate::application::services::search_service::MAX_QUERY_LIMIT;
use crate::infrastructure::external_services::inference_client::EmbeddingsClientConfig;
use crate::infrastructure::external_services::recursive_splitter::DEFAULT_CHUNK_SIZE;

pub const DEFAULT_USER_ID: &str = "anonymous";

#[derive(Debug)]
pub enum ConfigError {
    Missing(String),
    Invalid { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} not set", key),
            ConfigError::Invalid { key, value } => {
                write!(f, "{} has an invalid value: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStoreBackend {
    Postgres { database_url: String, pool_size: u32 },
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub document_store: DocumentStoreBackend,
    pub embeddings: EmbeddingsClientConfig,
    pub chunk_size: usize,
    pub default_user_id: String,
    pub max_upload_bytes: usize,
    pub query_default_limit: usize,
    pub scrape_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        let document_store = match env.get("DOCUMENT_STORE").as_deref() {
            None | Some("postgres") => DocumentStoreBackend::Postgres {
                database_url: env.require("DATABASE_URL")?,
                pool_size: env.parse_or("DATABASE_POOL_SIZE", 10)?,
            },
            Some("memory") => DocumentStoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "DOCUMENT_STORE".to_string(),
                    value: other.to_string(),
                });
            }
        };

        let dimension: usize = env.parse_or("EMBEDDING_DIMENSION", 1536)?;
        if dimension == 0 {
            return Err(ConfigError::Invalid {
                key: "EMBEDDING_DIMENSION".to_string(),
                value: "0".to_string(),
            });
        }

        let query_default_limit: usize = env.parse_or("QUERY_DEFAULT_LIMIT", 5)?;
        if !(1..=MAX_QUERY_LIMIT).contains(&query_default_limit) {
            return Err(ConfigError::Invalid {
                key: "QUERY_DEFAULT_LIMIT".to_string(),
                value: query_default_limit.to_string(),
            });
        }

        let embeddings = EmbeddingsClientConfig {
            service_url: env.require("EMBEDDINGS_SERVICE_URL")?,
            api_key: env.get("EMBEDDINGS_API_KEY"),
            model_name: env
                .get("EMBEDDINGS_MODEL")
                .unwrap_or_else(|| "default".to_string()),
            dimension,
            max_retries: env.parse_or("EMBEDDINGS_MAX_RETRIES", 3)?,
            timeout_secs: env.parse_or("EMBEDDINGS_TIMEOUT_SECS", 30)?,
            backoff_factor: env.parse_or("EMBEDDINGS_BACKOFF_FACTOR", 1.5)?,
        };

        Ok(Self {
            port: env.parse_or("PORT", 3000)?,
            document_store,
            embeddings,
            chunk_size: env.parse_or("CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?,
            default_user_id: env
                .get("DEFAULT_USER_ID")
                .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            max_upload_bytes: env.parse_or("MAX_UPLOAD_BYTES", 25 * 1024 * 1024)?,
            query_default_limit,
            scrape_timeout_secs: env.parse_or("SCRAPE_TIMEOUT_SECS", 20)?,
        })
    }
}

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Unset and blank values are treated the same.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn require(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                key: key.to_string(),
                value,
            }),
        }
    }
}
