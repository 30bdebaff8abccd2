//! Database connection settings.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required for the postgres backend)
//! - `DB_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `DB_CONNECT_RETRIES`: Connection attempts before giving up (default: 3)

use std::env;

use crate::error::{ConfigError, parse_or};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_retries: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let connect_retries = parse_or(&lookup, "DB_CONNECT_RETRIES", 3)?;
        if connect_retries == 0 {
            return Err(ConfigError::invalid(
                "DB_CONNECT_RETRIES",
                "0",
                "at least one attempt is required",
            ));
        }

        Ok(Self {
            url,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            connect_retries,
        })
    }
}
