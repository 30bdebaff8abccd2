use classbook_core::{DomainError, EntityKind};
use thiserror::Error;

/// Failures reported by a [`Repository`](crate::Repository) backend.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique index rejected the write.
    #[error("{entity} with locator {locator:?} already exists")]
    Duplicate { entity: EntityKind, locator: String },

    /// A stored document does not match the entity shape, or vice versa.
    #[error("{entity} document could not be converted: {source}")]
    Serialization {
        entity: EntityKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub(crate) fn serialization(entity: EntityKind, source: serde_json::Error) -> Self {
        Self::Serialization { entity, source }
    }
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate { entity, locator } => DomainError::conflict(entity, locator),
            other => DomainError::Storage(other.into()),
        }
    }
}
