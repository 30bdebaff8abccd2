use std::sync::Arc;

use classbook_core::{DomainError, EntityKind};
use classbook_db::Repository;
use classbook_models::{CreateParentDto, Parent, ParentId, UpdateParentDto};
use serde_json::Value;
use tracing::instrument;

use crate::modules::base::EntityService;

/// Parents do not know their students, so this service depends on nothing
/// else. The student lock on deletion lives in
/// [`SchoolServices::remove_parent`](crate::services::SchoolServices::remove_parent).
#[derive(Clone)]
pub struct ParentService {
    base: EntityService<Parent>,
}

impl ParentService {
    pub fn new(repository: Arc<dyn Repository<Parent>>) -> Self {
        Self {
            base: EntityService::new(repository),
        }
    }

    #[instrument(skip(self, dto), fields(document = %dto.document))]
    pub async fn create(&self, dto: CreateParentDto) -> Result<Parent, DomainError> {
        let parent = Parent::new(dto)?;
        self.base
            .ensure_unique("document", &parent.document, None)
            .await?;
        self.base.save(&parent).await?;
        Ok(parent)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: ParentId, patch: UpdateParentDto) -> Result<Parent, DomainError> {
        let current = self.base.find_by_id(id).await?;
        let updated = current.merge(patch)?;
        self.base.save(&updated).await?;
        Ok(updated)
    }

    /// Appends phone numbers, skipping ones already on file.
    #[instrument(skip(self))]
    pub async fn add_phones(&self, id: ParentId, phones: Vec<String>) -> Result<Parent, DomainError> {
        if phones.is_empty() {
            return Err(DomainError::bad_request(
                EntityKind::Parent,
                "Phone cannot be empty",
            ));
        }
        let current = self.base.find_by_id(id).await?;
        let updated = current.add_phones(phones)?;
        self.base.save(&updated).await?;
        Ok(updated)
    }

    pub async fn find_by_id(&self, id: ParentId) -> Result<Parent, DomainError> {
        self.base.find_by_id(id).await
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<Vec<Parent>, DomainError> {
        self.base.list(page, per_page).await
    }

    pub async fn list_by(&self, property: &str, value: Value) -> Result<Vec<Parent>, DomainError> {
        self.base.list_by(property, value).await
    }

    pub(crate) async fn remove(&self, id: ParentId) -> Result<(), DomainError> {
        self.base.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::fixtures;
    use classbook_db::InMemoryRepository;

    fn service() -> ParentService {
        ParentService::new(Arc::new(InMemoryRepository::<Parent>::new()))
    }

    #[tokio::test]
    async fn test_create_duplicate_document_conflicts() {
        let service = service();
        service.create(fixtures::parent_dto("p-1")).await.unwrap();

        let err = service.create(fixtures::parent_dto("p-1")).await.unwrap_err();
        assert_eq!(err.code(), "CONFLICT");
        assert_eq!(err.entity(), Some(EntityKind::Parent));
    }

    #[tokio::test]
    async fn test_update_appends_emails_without_duplicates() {
        let service = service();
        let parent = service.create(fixtures::parent_dto("p-1")).await.unwrap();
        let patch = UpdateParentDto {
            emails: Some(vec!["marta@work.test".to_string()]),
            ..Default::default()
        };

        service.update(parent.id, patch.clone()).await.unwrap();
        let replayed = service.update(parent.id, patch).await.unwrap();

        assert_eq!(replayed.emails, vec!["marta@home.test", "marta@work.test"]);
        assert_eq!(replayed.document, "p-1");
    }

    #[tokio::test]
    async fn test_update_rejects_empty_address() {
        let service = service();
        let parent = service.create(fixtures::parent_dto("p-1")).await.unwrap();

        let err = service
            .update(
                parent.id,
                UpdateParentDto {
                    address: Some(Vec::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_PAYLOAD");
        assert_eq!(service.find_by_id(parent.id).await.unwrap(), parent);
    }

    #[tokio::test]
    async fn test_add_phones() {
        let service = service();
        let parent = service.create(fixtures::parent_dto("p-1")).await.unwrap();

        let err = service.add_phones(parent.id, Vec::new()).await.unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");

        let updated = service
            .add_phones(parent.id, vec!["+55 41 97777-1111".to_string()])
            .await
            .unwrap();
        assert_eq!(updated.phones.len(), 2);
    }

    #[tokio::test]
    async fn test_add_phones_missing_parent() {
        let err = service()
            .add_phones(ParentId::new(), vec!["1".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
