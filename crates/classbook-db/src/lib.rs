//! # Classbook DB
//!
//! Document persistence for the Classbook API.
//!
//! The store knows nothing about relationships: it saves, fetches, lists and
//! deletes whole records, and filters them by one serialized property. All
//! referential rules live in the service layer on top of [`Repository`].
//!
//! - [`InMemoryRepository`]: process-local store, used by tests and the
//!   `memory` storage backend
//! - [`PgDocumentRepository`]: JSONB documents in PostgreSQL
//! - [`init_db_pool`]: pool creation with retry, followed by migrations
//!
//! # Example
//!
//! ```ignore
//! use classbook_db::{InMemoryRepository, Repository};
//! use classbook_models::Teacher;
//!
//! let repo = InMemoryRepository::<Teacher>::new();
//! repo.save(&teacher).await?;
//! let same = repo.list_by("document", &serde_json::json!(teacher.document)).await?;
//! ```

mod error;
pub mod filter;
mod memory;
mod pool;
mod postgres;
mod repository;

pub use error::RepositoryError;
pub use memory::InMemoryRepository;
pub use pool::{MIGRATOR, init_db_pool};
pub use postgres::PgDocumentRepository;
pub use repository::Repository;

// Re-export PgPool for convenience
pub use sqlx::PgPool;
