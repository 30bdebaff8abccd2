//! Operations every entity service shares.
//!
//! [`EntityService`] wraps one [`Repository`] and turns its "absent" results
//! into [`DomainError::NotFound`]. The per-entity services build their
//! integrity rules on top of it.

use std::sync::Arc;

use classbook_core::pagination::slice_page;
use classbook_core::{DomainError, Entity};
use classbook_db::Repository;
use serde_json::Value;
use tracing::{debug, instrument};
use uuid::Uuid;

pub struct EntityService<E: Entity> {
    repository: Arc<dyn Repository<E>>,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        Self { repository }
    }

    /// Fetches the record or fails with `NotFound(E, id)`.
    #[instrument(skip(self), fields(entity = %E::KIND))]
    pub async fn find_by_id(&self, id: E::Id) -> Result<E, DomainError> {
        self.repository
            .find_by_id(id.into())
            .await?
            .ok_or_else(|| DomainError::not_found(E::KIND, id))
    }

    /// One page of records in insertion order; a page past the end is empty.
    #[instrument(skip(self), fields(entity = %E::KIND))]
    pub async fn list(&self, page: i64, per_page: i64) -> Result<Vec<E>, DomainError> {
        let all = self.repository.list().await?;
        Ok(slice_page(all, page, per_page))
    }

    #[instrument(skip(self, value), fields(entity = %E::KIND))]
    pub async fn list_by(&self, property: &str, value: Value) -> Result<Vec<E>, DomainError> {
        Ok(self.repository.list_by(property, &value).await?)
    }

    /// Fails with `Conflict(E, value)` when any record already has `value`
    /// in `property`, ignoring the record identified by `except`.
    pub async fn ensure_unique(
        &self,
        property: &str,
        value: &str,
        except: Option<E::Id>,
    ) -> Result<(), DomainError> {
        let except: Option<Uuid> = except.map(Into::into);
        let taken = self
            .list_by(property, Value::from(value))
            .await?
            .iter()
            .any(|existing| Some(existing.key()) != except);

        if taken {
            return Err(DomainError::conflict(E::KIND, value));
        }
        Ok(())
    }

    /// Deletes the record; `NotFound` when it does not exist.
    #[instrument(skip(self), fields(entity = %E::KIND))]
    pub async fn remove(&self, id: E::Id) -> Result<(), DomainError> {
        self.find_by_id(id).await?;
        self.repository.remove(id.into()).await?;
        debug!(%id, "removed");
        Ok(())
    }

    /// Upserts the record. A unique-index rejection surfaces as `Conflict`.
    pub async fn save(&self, entity: &E) -> Result<(), DomainError> {
        self.repository.save(entity).await?;
        debug!(entity = %E::KIND, id = %entity.id(), "saved");
        Ok(())
    }
}
