//! Top-level application settings.
//!
//! # Environment Variables
//!
//! - `HOST`: Bind address (default: `0.0.0.0`)
//! - `PORT`: Bind port (default: 3000)
//! - `STORAGE_BACKEND`: `memory` or `postgres` (default: `memory`)
//!
//! The database section is only read when the postgres backend is selected.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::cors::CorsConfig;
use crate::database::DatabaseConfig;
use crate::error::{ConfigError, parse_or};

/// Where documents are persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => Err(format!("unknown storage backend `{other}`, expected memory or postgres")),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    /// Present only when `storage` is [`StorageBackend::Postgres`].
    pub database: Option<DatabaseConfig>,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage = parse_or(&lookup, "STORAGE_BACKEND", StorageBackend::Memory)?;
        let database = match storage {
            StorageBackend::Postgres => Some(DatabaseConfig::from_lookup(&lookup)?),
            StorageBackend::Memory => None,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            storage,
            database,
            cors: CorsConfig::from_lookup(&lookup),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_use_memory_backend() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.storage, StorageBackend::Memory);
        assert!(config.database.is_none());
    }

    #[test]
    fn test_postgres_backend_reads_database_section() {
        let config = AppConfig::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "Postgres"),
            ("DATABASE_URL", "postgres://localhost/classbook"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.database.map(|db| db.url),
            Some("postgres://localhost/classbook".to_string())
        );
    }

    #[test]
    fn test_postgres_backend_requires_url() {
        let err = AppConfig::from_lookup(lookup(&[("STORAGE_BACKEND", "postgres")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_unknown_backend() {
        let err = AppConfig::from_lookup(lookup(&[("STORAGE_BACKEND", "mongo")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "STORAGE_BACKEND", .. }));
    }
}
