use std::sync::Arc;

use classbook_core::{DomainError, EntityKind};
use classbook_db::Repository;
use classbook_models::{
    Class, ClassId, CreateStudentDto, Parent, ParentId, Student, StudentId, UpdateStudentDto,
    first_duplicate,
};
use serde_json::Value;
use tracing::instrument;

use crate::modules::base::EntityService;
use crate::modules::parents::ParentService;

fn join_ids(ids: &[ParentId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Owns the student/parent link and its minimum-one-parent invariant.
///
/// The class reference is checked through a read-only class repository
/// rather than `ClassService`, which itself depends on this service.
#[derive(Clone)]
pub struct StudentService {
    base: EntityService<Student>,
    parents: ParentService,
    classes: Arc<dyn Repository<Class>>,
}

impl StudentService {
    pub fn new(
        repository: Arc<dyn Repository<Student>>,
        parents: ParentService,
        classes: Arc<dyn Repository<Class>>,
    ) -> Self {
        Self {
            base: EntityService::new(repository),
            parents,
            classes,
        }
    }

    async fn ensure_class_exists(&self, id: ClassId) -> Result<(), DomainError> {
        match self.classes.find_by_id(id.into()).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(EntityKind::Class, id)),
        }
    }

    /// Resolves every id, failing on the first one that does not exist.
    async fn resolve_parents(&self, ids: &[ParentId]) -> Result<Vec<Parent>, DomainError> {
        let mut parents = Vec::with_capacity(ids.len());
        for id in ids {
            parents.push(self.parents.find_by_id(*id).await?);
        }
        Ok(parents)
    }

    /// Creates a student after checking every reference it carries.
    ///
    /// Nothing is written unless the document is free, the parent list has
    /// no repeats, every parent exists and the class exists.
    #[instrument(skip(self, dto), fields(document = %dto.document))]
    pub async fn create(&self, dto: CreateStudentDto) -> Result<Student, DomainError> {
        let student = Student::new(dto)?;

        self.base
            .ensure_unique("document", &student.document, None)
            .await?;
        if let Some(repeated) = first_duplicate(&student.parents) {
            return Err(DomainError::bad_request(
                EntityKind::Student,
                format!("Parent {repeated} is listed more than once"),
            ));
        }
        self.resolve_parents(&student.parents).await?;
        self.ensure_class_exists(student.class_id).await?;

        self.base.save(&student).await?;
        Ok(student)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: StudentId,
        patch: UpdateStudentDto,
    ) -> Result<Student, DomainError> {
        let current = self.base.find_by_id(id).await?;
        let updated = current.merge(patch)?;

        if updated.class_id != current.class_id {
            self.ensure_class_exists(updated.class_id).await?;
        }

        self.base.save(&updated).await?;
        Ok(updated)
    }

    /// Adds parents to the student. Every id must exist and none may already
    /// be linked; either all are added or none.
    #[instrument(skip(self))]
    pub async fn link_parents(
        &self,
        id: StudentId,
        parent_ids: Vec<ParentId>,
    ) -> Result<Student, DomainError> {
        let current = self.base.find_by_id(id).await?;

        if parent_ids.is_empty() {
            return Err(DomainError::bad_request(
                EntityKind::Student,
                "At least one parent id is required",
            ));
        }
        if let Some(repeated) = first_duplicate(&parent_ids) {
            return Err(DomainError::conflict(EntityKind::Parent, repeated));
        }
        let already_linked: Vec<ParentId> = parent_ids
            .iter()
            .copied()
            .filter(|parent| current.has_parent(*parent))
            .collect();
        if !already_linked.is_empty() {
            return Err(DomainError::conflict(
                EntityKind::Parent,
                join_ids(&already_linked),
            ));
        }
        self.resolve_parents(&parent_ids).await?;

        let mut linked = current.parents.clone();
        linked.extend(parent_ids);
        let updated = current.with_parents(linked)?;
        self.base.save(&updated).await?;
        Ok(updated)
    }

    /// Removes parents from the student, refusing to leave it with none.
    #[instrument(skip(self))]
    pub async fn unlink_parents(
        &self,
        id: StudentId,
        parent_ids: Vec<ParentId>,
    ) -> Result<Student, DomainError> {
        let current = self.base.find_by_id(id).await?;

        if parent_ids.is_empty() {
            return Err(DomainError::bad_request(
                EntityKind::Student,
                "At least one parent id is required",
            ));
        }
        if let Some(unknown) = parent_ids.iter().find(|parent| !current.has_parent(**parent)) {
            return Err(DomainError::not_found(EntityKind::Parent, unknown));
        }

        let remaining: Vec<ParentId> = current
            .parents
            .iter()
            .copied()
            .filter(|parent| !parent_ids.contains(parent))
            .collect();
        if remaining.is_empty() {
            return Err(DomainError::StudentMustHaveAtLeastOneParent {
                student: id.to_string(),
                parents: parent_ids.iter().map(ToString::to_string).collect(),
            });
        }

        let updated = current.with_parents(remaining)?;
        self.base.save(&updated).await?;
        Ok(updated)
    }

    /// The student's parents; a stale link surfaces as `NotFound(Parent)`.
    #[instrument(skip(self))]
    pub async fn get_parents(&self, id: StudentId) -> Result<Vec<Parent>, DomainError> {
        let student = self.base.find_by_id(id).await?;
        self.resolve_parents(&student.parents).await
    }

    pub async fn find_by_id(&self, id: StudentId) -> Result<Student, DomainError> {
        self.base.find_by_id(id).await
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<Vec<Student>, DomainError> {
        self.base.list(page, per_page).await
    }

    pub async fn list_by(&self, property: &str, value: Value) -> Result<Vec<Student>, DomainError> {
        self.base.list_by(property, value).await
    }

    pub async fn remove(&self, id: StudentId) -> Result<(), DomainError> {
        self.base.remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::fixtures;
    use crate::services::SchoolServices;

    struct World {
        services: SchoolServices,
        class: ClassId,
        parent: ParentId,
    }

    async fn world() -> World {
        let services = SchoolServices::memory();
        let class = services
            .classes
            .create(fixtures::class_dto("1A-M", None))
            .await
            .unwrap();
        let parent = services
            .parents
            .create(fixtures::parent_dto("p-1"))
            .await
            .unwrap();
        World {
            services,
            class: class.id,
            parent: parent.id,
        }
    }

    #[tokio::test]
    async fn test_create_with_existing_references() {
        let w = world().await;
        let student = w
            .services
            .students
            .create(fixtures::student_dto("s-1", w.class, vec![w.parent]))
            .await
            .unwrap();

        assert_eq!(student.parents, vec![w.parent]);
        assert_eq!(student.class_id, w.class);
    }

    #[tokio::test]
    async fn test_create_with_no_parents_is_invalid() {
        let w = world().await;
        let err = w
            .services
            .students
            .create(fixtures::student_dto("s-1", w.class, Vec::new()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_PAYLOAD");
    }

    #[tokio::test]
    async fn test_create_with_one_missing_parent_persists_nothing() {
        let w = world().await;
        let ghost = ParentId::new();

        let err = w
            .services
            .students
            .create(fixtures::student_dto("s-1", w.class, vec![w.parent, ghost]))
            .await
            .unwrap_err();

        match err {
            DomainError::NotFound { entity, locator } => {
                assert_eq!(entity, EntityKind::Parent);
                assert_eq!(locator, ghost.to_string());
            }
            other => panic!("expected not found, got {other:?}"),
        }
        assert!(w.services.students.list(1, 20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_with_repeated_parent_is_bad_request() {
        let w = world().await;
        let err = w
            .services
            .students
            .create(fixtures::student_dto("s-1", w.class, vec![w.parent, w.parent]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_create_with_missing_class() {
        let w = world().await;
        let err = w
            .services
            .students
            .create(fixtures::student_dto("s-1", ClassId::new(), vec![w.parent]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.entity(), Some(EntityKind::Class));
    }

    #[tokio::test]
    async fn test_create_duplicate_document() {
        let w = world().await;
        let students = &w.services.students;
        students
            .create(fixtures::student_dto("s-1", w.class, vec![w.parent]))
            .await
            .unwrap();

        let err = students
            .create(fixtures::student_dto("s-1", w.class, vec![w.parent]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "CONFLICT");
    }

    #[tokio::test]
    async fn test_update_appends_allergies_idempotently() {
        let w = world().await;
        let students = &w.services.students;
        let student = students
            .create(fixtures::student_dto("s-1", w.class, vec![w.parent]))
            .await
            .unwrap();
        let patch = UpdateStudentDto {
            allergies: Some(vec!["peanut".to_string()]),
            ..Default::default()
        };

        students.update(student.id, patch.clone()).await.unwrap();
        let replayed = students.update(student.id, patch).await.unwrap();
        assert_eq!(replayed.allergies, vec!["peanut"]);
    }

    #[tokio::test]
    async fn test_update_to_missing_class() {
        let w = world().await;
        let students = &w.services.students;
        let student = students
            .create(fixtures::student_dto("s-1", w.class, vec![w.parent]))
            .await
            .unwrap();

        let err = students
            .update(
                student.id,
                UpdateStudentDto {
                    class_id: Some(ClassId::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(students.find_by_id(student.id).await.unwrap(), student);
    }

    #[tokio::test]
    async fn test_link_parents() {
        let w = world().await;
        let students = &w.services.students;
        let second = w
            .services
            .parents
            .create(fixtures::parent_dto("p-2"))
            .await
            .unwrap();
        let student = students
            .create(fixtures::student_dto("s-1", w.class, vec![w.parent]))
            .await
            .unwrap();

        let err = students.link_parents(student.id, Vec::new()).await.unwrap_err();
        assert_eq!(err.code(), "BAD_REQUEST");

        let err = students
            .link_parents(student.id, vec![w.parent])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "CONFLICT");

        let err = students
            .link_parents(student.id, vec![second.id, w.parent])
            .await
            .unwrap_err();
        match err {
            DomainError::Conflict { entity, locator } => {
                assert_eq!(entity, EntityKind::Parent);
                assert_eq!(locator, w.parent.to_string());
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        let err = students
            .link_parents(student.id, vec![second.id, second.id])
            .await
            .unwrap_err();
        match err {
            DomainError::Conflict { locator, .. } => assert_eq!(locator, second.id.to_string()),
            other => panic!("expected conflict, got {other:?}"),
        }

        let err = students
            .link_parents(student.id, vec![ParentId::new()])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");

        let linked = students
            .link_parents(student.id, vec![second.id])
            .await
            .unwrap();
        assert_eq!(linked.parents, vec![w.parent, second.id]);
    }

    #[tokio::test]
    async fn test_unlink_last_parent_is_refused() {
        let w = world().await;
        let students = &w.services.students;
        let student = students
            .create(fixtures::student_dto("s-1", w.class, vec![w.parent]))
            .await
            .unwrap();

        let err = students
            .unlink_parents(student.id, vec![w.parent])
            .await
            .unwrap_err();
        match err {
            DomainError::StudentMustHaveAtLeastOneParent { student: sid, parents } => {
                assert_eq!(sid, student.id.to_string());
                assert_eq!(parents, vec![w.parent.to_string()]);
            }
            other => panic!("expected minimum parent error, got {other:?}"),
        }
        assert_eq!(
            students.find_by_id(student.id).await.unwrap().parents,
            vec![w.parent]
        );
    }

    #[tokio::test]
    async fn test_unlink_parents() {
        let w = world().await;
        let students = &w.services.students;
        let second = w
            .services
            .parents
            .create(fixtures::parent_dto("p-2"))
            .await
            .unwrap();
        let student = students
            .create(fixtures::student_dto("s-1", w.class, vec![w.parent, second.id]))
            .await
            .unwrap();

        let err = students
            .unlink_parents(student.id, vec![ParentId::new()])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");

        let updated = students
            .unlink_parents(student.id, vec![w.parent])
            .await
            .unwrap();
        assert_eq!(updated.parents, vec![second.id]);
    }

    #[tokio::test]
    async fn test_get_parents() {
        let w = world().await;
        let students = &w.services.students;
        let student = students
            .create(fixtures::student_dto("s-1", w.class, vec![w.parent]))
            .await
            .unwrap();

        let parents = students.get_parents(student.id).await.unwrap();
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].id, w.parent);
    }
}
