//! Configuration management for Marginalia Server

use serde::Deserialize;
use std::env;

use crate::storage::StorageMethod;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where and how highlights are persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Body shape the backend expects (`flat-file` or `record-store`).
    pub method: StorageMethod,
    /// Base URL of the highlight backend.
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Base URL of the text-search service.
    pub service_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            storage: StorageConfig {
                method: StorageMethod::FlatFile,
                base_url: "http://localhost:8080/api".to_string(),
            },
            search: SearchConfig {
                service_url: "http://localhost:8081".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },
            storage: StorageConfig {
                method: match env::var("STORAGE_METHOD")
                    .unwrap_or_else(|_| "flat-file".to_string())
                    .as_str()
                {
                    "record-store" => StorageMethod::RecordStore,
                    _ => StorageMethod::FlatFile,
                },
                base_url: env::var("HIGHLIGHT_BACKEND_URL")?,
            },
            search: SearchConfig {
                service_url: env::var("SEARCH_SERVICE_URL")?,
            },
        })
    }
}
