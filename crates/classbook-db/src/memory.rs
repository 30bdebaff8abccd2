//! Process-local document store.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use classbook_core::Entity;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::filter;
use crate::repository::Repository;

/// Keeps records in a vector, in insertion order.
///
/// Clones share the same storage.
pub struct InMemoryRepository<E> {
    documents: Arc<RwLock<Vec<E>>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
            _entity: PhantomData,
        }
    }
}

impl<E> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            documents: Arc::new(RwLock::new(Vec::new())),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store already holding `records`.
    pub fn with_records(records: Vec<E>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(records)),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, RepositoryError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|doc| doc.key() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.documents.read().await.clone())
    }

    async fn list_by(&self, property: &str, value: &Value) -> Result<Vec<E>, RepositoryError> {
        let documents = self.documents.read().await;
        let mut found = Vec::new();
        for doc in documents.iter() {
            let body = serde_json::to_value(doc)
                .map_err(|e| RepositoryError::serialization(E::KIND, e))?;
            if filter::matches(&body, property, value) {
                found.push(doc.clone());
            }
        }
        Ok(found)
    }

    async fn save(&self, entity: &E) -> Result<(), RepositoryError> {
        let mut documents = self.documents.write().await;
        match documents.iter_mut().find(|doc| doc.key() == entity.key()) {
            Some(existing) => *existing = entity.clone(),
            None => documents.push(entity.clone()),
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.documents.write().await.retain(|doc| doc.key() != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classbook_core::EntityKind;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: Uuid,
        title: String,
        tags: Vec<String>,
    }

    impl Entity for Note {
        type Id = Uuid;

        const KIND: EntityKind = EntityKind::Teacher;

        fn id(&self) -> Uuid {
            self.id
        }
    }

    fn note(title: &str, tags: &[&str]) -> Note {
        Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_save_inserts_then_replaces() {
        let repo: InMemoryRepository<Note> = InMemoryRepository::new();
        let mut first = note("a", &[]);
        repo.save(&first).await.unwrap();
        repo.save(&note("b", &[])).await.unwrap();

        first.title = "a2".to_string();
        repo.save(&first).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title, "a2");
        assert_eq!(all[1].title, "b");
    }

    #[tokio::test]
    async fn test_find_and_remove() {
        let repo: InMemoryRepository<Note> = InMemoryRepository::new();
        let n = note("a", &[]);
        repo.save(&n).await.unwrap();

        assert_eq!(repo.find_by_id(n.id).await.unwrap(), Some(n.clone()));
        repo.remove(n.id).await.unwrap();
        assert_eq!(repo.find_by_id(n.id).await.unwrap(), None);

        // removing twice is harmless
        repo.remove(n.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_by_scalar_and_array_fields() {
        let repo = InMemoryRepository::with_records(vec![
            note("a", &["x"]),
            note("b", &["y", "z"]),
            note("a", &[]),
        ]);

        assert_eq!(repo.list_by("title", &json!("a")).await.unwrap().len(), 2);
        assert_eq!(repo.list_by("tags", &json!("z")).await.unwrap().len(), 1);
        assert_eq!(
            repo.list_by("tags", &json!(["x", "y"])).await.unwrap().len(),
            2
        );
        assert!(repo.list_by("title", &json!("c")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo: InMemoryRepository<Note> = InMemoryRepository::new();
        let other = repo.clone();
        repo.save(&note("a", &[])).await.unwrap();
        assert_eq!(other.list().await.unwrap().len(), 1);
    }
}
