//! PostgreSQL document store.
//!
//! Every collection shares the `documents` table; a record is one JSONB
//! `body` row keyed by `(collection, id)`. Property filters run against the
//! JSONB body so the query shape is the same for every entity type.

use std::marker::PhantomData;

use async_trait::async_trait;
use classbook_core::Entity;
use serde_json::Value;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::filter;
use crate::repository::Repository;

const CLASS_CODE_INDEX: &str = "uq_documents_class_code";

pub struct PgDocumentRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for PgDocumentRepository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> PgDocumentRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    fn decode(body: Value) -> Result<E, RepositoryError> {
        serde_json::from_value(body).map_err(|e| RepositoryError::serialization(E::KIND, e))
    }

    fn decode_all(bodies: Vec<Value>) -> Result<Vec<E>, RepositoryError> {
        bodies.into_iter().map(Self::decode).collect()
    }

    /// Turns a unique-index violation into [`RepositoryError::Duplicate`],
    /// naming the business key that collided.
    fn map_write_error(err: sqlx::Error, body: &Value) -> RepositoryError {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            let key = match db_err.constraint() {
                Some(CLASS_CODE_INDEX) => "code",
                _ => "document",
            };
            let locator = body
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return RepositoryError::Duplicate {
                entity: E::KIND,
                locator,
            };
        }
        RepositoryError::Database(err)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for PgDocumentRepository<E> {
    #[instrument(skip(self), fields(collection = E::KIND.collection()))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<E>, RepositoryError> {
        let body = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(E::KIND.collection())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        body.map(Self::decode).transpose()
    }

    #[instrument(skip(self), fields(collection = E::KIND.collection()))]
    async fn list(&self) -> Result<Vec<E>, RepositoryError> {
        let bodies = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 ORDER BY seq",
        )
        .bind(E::KIND.collection())
        .fetch_all(&self.pool)
        .await?;

        Self::decode_all(bodies)
    }

    #[instrument(skip(self, value), fields(collection = E::KIND.collection()))]
    async fn list_by(&self, property: &str, value: &Value) -> Result<Vec<E>, RepositoryError> {
        let candidates = Value::Array(filter::candidates(value).into_iter().cloned().collect());

        let bodies = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT d.body
            FROM documents d
            WHERE d.collection = $1
              AND EXISTS (
                  SELECT 1
                  FROM jsonb_array_elements($3) AS c(v)
                  WHERE d.body -> $2 = c.v
                     OR (jsonb_typeof(d.body -> $2) = 'array'
                         AND d.body -> $2 @> jsonb_build_array(c.v))
              )
            ORDER BY d.seq
            "#,
        )
        .bind(E::KIND.collection())
        .bind(property)
        .bind(candidates)
        .fetch_all(&self.pool)
        .await?;

        Self::decode_all(bodies)
    }

    #[instrument(skip(self, entity), fields(collection = E::KIND.collection(), id = %entity.key()))]
    async fn save(&self, entity: &E) -> Result<(), RepositoryError> {
        let body =
            serde_json::to_value(entity).map_err(|e| RepositoryError::serialization(E::KIND, e))?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET
                body = EXCLUDED.body,
                updated_at = NOW()
            "#,
        )
        .bind(E::KIND.collection())
        .bind(entity.key())
        .bind(&body)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &body))?;

        Ok(())
    }

    #[instrument(skip(self), fields(collection = E::KIND.collection()))]
    async fn remove(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(E::KIND.collection())
            .bind(id)
            .execute(&self.pool)
            .await?;

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
    struct Record {
        id: Uuid,
        document: String,
        parents: Vec<String>,
    }

    impl Entity for Record {
        type Id = Uuid;

        const KIND: EntityKind = EntityKind::Student;

        fn id(&self) -> Uuid {
            self.id
        }
    }

    fn record(document: &str, parents: &[&str]) -> Record {
        Record {
            id: Uuid::new_v4(),
            document: document.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_upsert_keeps_insertion_order(pool: PgPool) {
        let repo = PgDocumentRepository::<Record>::new(pool);
        let mut first = record("1", &["p1"]);
        repo.save(&first).await.unwrap();
        repo.save(&record("2", &["p2"])).await.unwrap();

        first.parents.push("p3".to_string());
        repo.save(&first).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], first);
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_list_by_matches_array_members(pool: PgPool) {
        let repo = PgDocumentRepository::<Record>::new(pool);
        repo.save(&record("1", &["p1", "p2"])).await.unwrap();
        repo.save(&record("2", &["p3"])).await.unwrap();

        assert_eq!(repo.list_by("parents", &json!("p2")).await.unwrap().len(), 1);
        assert_eq!(
            repo.list_by("parents", &json!(["p1", "p3"])).await.unwrap().len(),
            2
        );
        assert_eq!(repo.list_by("document", &json!("2")).await.unwrap().len(), 1);
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_duplicate_document_is_rejected(pool: PgPool) {
        let repo = PgDocumentRepository::<Record>::new(pool);
        repo.save(&record("dup", &[])).await.unwrap();

        let err = repo.save(&record("dup", &[])).await.unwrap_err();
        match err {
            RepositoryError::Duplicate { entity, locator } => {
                assert_eq!(entity, EntityKind::Student);
                assert_eq!(locator, "dup");
            }
            other => panic!("expected duplicate, got {other:?}"),
        }
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_remove(pool: PgPool) {
        let repo = PgDocumentRepository::<Record>::new(pool);
        let r = record("1", &[]);
        repo.save(&r).await.unwrap();
        repo.remove(r.id).await.unwrap();
        assert!(repo.find_by_id(r.id).await.unwrap().is_none());
    }
}
