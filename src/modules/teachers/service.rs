use std::sync::Arc;

use classbook_core::DomainError;
use classbook_db::Repository;
use classbook_models::{CreateTeacherDto, Teacher, TeacherId, UpdateTeacherDto};
use serde_json::Value;
use tracing::instrument;

use crate::modules::base::EntityService;

/// Teachers have no outgoing references; only `document` uniqueness is
/// enforced here. The class lock on deletion lives in
/// [`SchoolServices::remove_teacher`](crate::services::SchoolServices::remove_teacher).
#[derive(Clone)]
pub struct TeacherService {
    base: EntityService<Teacher>,
}

impl TeacherService {
    pub fn new(repository: Arc<dyn Repository<Teacher>>) -> Self {
        Self {
            base: EntityService::new(repository),
        }
    }

    #[instrument(skip(self, dto), fields(document = %dto.document))]
    pub async fn create(&self, dto: CreateTeacherDto) -> Result<Teacher, DomainError> {
        let teacher = Teacher::new(dto)?;
        self.base
            .ensure_unique("document", &teacher.document, None)
            .await?;
        self.base.save(&teacher).await?;
        Ok(teacher)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: TeacherId,
        patch: UpdateTeacherDto,
    ) -> Result<Teacher, DomainError> {
        let current = self.base.find_by_id(id).await?;
        let updated = current.merge(patch)?;
        self.base.save(&updated).await?;
        Ok(updated)
    }

    pub async fn find_by_id(&self, id: TeacherId) -> Result<Teacher, DomainError> {
        self.base.find_by_id(id).await
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<Vec<Teacher>, DomainError> {
        self.base.list(page, per_page).await
    }

    pub async fn list_by(&self, property: &str, value: Value) -> Result<Vec<Teacher>, DomainError> {
        self.base.list_by(property, value).await
    }

    pub(crate) async fn remove(&self, id: TeacherId) -> Result<(), DomainError> {
        self.base.remove(id).await
    }
}
