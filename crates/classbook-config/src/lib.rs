//! # Classbook Config
//!
//! Configuration types for the Classbook API.
//!
//! Every struct has a `from_env()` constructor reading process environment
//! variables and a `from_lookup()` twin taking any key lookup, which is what
//! the tests use.
//!
//! - [`app`]: bind address and storage backend selection
//! - [`database`]: PostgreSQL connection settings
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! # Example
//!
//! ```ignore
//! use classbook_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.bind_address());
//! ```

pub mod app;
pub mod cors;
pub mod database;
mod error;

// Re-export commonly used types at crate root
pub use app::{AppConfig, StorageBackend};
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
