use std::sync::Arc;

use classbook_core::{DomainError, EntityKind};
use classbook_db::Repository;
use classbook_models::{Class, ClassId, CreateClassDto, Student, Teacher, UpdateClassDto};
use serde_json::{Value, json};
use tracing::instrument;

use crate::modules::base::EntityService;
use crate::modules::students::StudentService;
use crate::modules::teachers::TeacherService;

#[derive(Clone)]
pub struct ClassService {
    base: EntityService<Class>,
    teachers: TeacherService,
    students: StudentService,
}

impl ClassService {
    pub fn new(
        repository: Arc<dyn Repository<Class>>,
        teachers: TeacherService,
        students: StudentService,
    ) -> Self {
        Self {
            base: EntityService::new(repository),
            teachers,
            students,
        }
    }

    #[instrument(skip(self, dto), fields(code = %dto.code))]
    pub async fn create(&self, dto: CreateClassDto) -> Result<Class, DomainError> {
        let class = Class::new(dto)?;

        self.base.ensure_unique("code", &class.code, None).await?;
        if let Some(teacher) = class.teacher {
            self.teachers.find_by_id(teacher).await?;
        }

        self.base.save(&class).await?;
        Ok(class)
    }

    /// Applies `patch`. A new code must still be unique; a new teacher must
    /// exist; `teacher: null` unassigns.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: ClassId, patch: UpdateClassDto) -> Result<Class, DomainError> {
        let current = self.base.find_by_id(id).await?;
        let updated = current.merge(patch)?;

        if updated.code != current.code {
            self.base
                .ensure_unique("code", &updated.code, Some(id))
                .await?;
        }
        if let Some(teacher) = updated.teacher
            && updated.teacher != current.teacher
        {
            self.teachers.find_by_id(teacher).await?;
        }

        self.base.save(&updated).await?;
        Ok(updated)
    }

    /// Deletes the class unless a student is still enrolled in it.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: ClassId) -> Result<(), DomainError> {
        self.base.find_by_id(id).await?;

        let enrolled = self.students.list_by("class", json!(id)).await?;
        if !enrolled.is_empty() {
            return Err(DomainError::dependency_conflict(
                EntityKind::Class,
                id,
                EntityKind::Student,
            ));
        }

        self.base.remove(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_teacher(&self, id: ClassId) -> Result<Teacher, DomainError> {
        let class = self.base.find_by_id(id).await?;
        let teacher = class.teacher.ok_or_else(|| {
            DomainError::missing_dependency(EntityKind::Teacher, id, EntityKind::Class)
        })?;
        self.teachers.find_by_id(teacher).await
    }

    #[instrument(skip(self))]
    pub async fn get_students(&self, id: ClassId) -> Result<Vec<Student>, DomainError> {
        self.base.find_by_id(id).await?;
        self.students.list_by("class", json!(id)).await
    }

    pub async fn find_by_id(&self, id: ClassId) -> Result<Class, DomainError> {
        self.base.find_by_id(id).await
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<Vec<Class>, DomainError> {
        self.base.list(page, per_page).await
    }

    pub async fn list_by(&self, property: &str, value: Value) -> Result<Vec<Class>, DomainError> {
        self.base.list_by(property, value).await
    }
}
