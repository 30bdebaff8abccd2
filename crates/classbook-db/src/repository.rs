use async_trait::async_trait;
use classbook_core::Entity;
use serde_json::Value;
use uuid::Uuid;

use crate::error::RepositoryError;

/// Storage port for one entity type.
///
/// Backends keep each record as a whole document keyed by its id. There are
/// no foreign keys, cascades or uniqueness guarantees at this level; the
/// service layer enforces them.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, RepositoryError>;

    /// Every record, in insertion order.
    async fn list(&self) -> Result<Vec<E>, RepositoryError>;

    /// Records whose serialized `property` matches `value`.
    ///
    /// See [`crate::filter::matches`] for the exact matching rule.
    async fn list_by(&self, property: &str, value: &Value) -> Result<Vec<E>, RepositoryError>;

    /// Inserts the record or replaces the one stored under the same id.
    async fn save(&self, entity: &E) -> Result<(), RepositoryError>;

    /// Deletes the record; a no-op when the id is unknown.
    async fn remove(&self, id: Uuid) -> Result<(), RepositoryError>;
}
