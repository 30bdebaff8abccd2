//! Wiring of the entity services and the operations that span several of
//! them.
//!
//! The dependency graph between services is kept acyclic:
//!
//! ```text
//! ClassService ──► TeacherService
//!      │
//!      └────────► StudentService ──► ParentService
//!                       └──────────► Repository<Class> (read-only)
//! ```
//!
//! Deleting a teacher or a parent, and the "who points at me" lookups, need
//! the reverse edges, so they live here instead of on the services.

use std::sync::Arc;

use classbook_core::{DomainError, EntityKind};
use classbook_db::{InMemoryRepository, PgDocumentRepository, PgPool, Repository};
use classbook_models::{
    Class, ClassId, Parent, ParentId, Student, StudentId, Teacher, TeacherId,
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::modules::classes::ClassService;
use crate::modules::parents::ParentService;
use crate::modules::students::StudentService;
use crate::modules::teachers::TeacherService;

#[derive(Clone)]
pub struct SchoolServices {
    pub teachers: TeacherService,
    pub classes: ClassService,
    pub students: StudentService,
    pub parents: ParentService,
}

impl SchoolServices {
    pub fn new(
        teachers: Arc<dyn Repository<Teacher>>,
        classes: Arc<dyn Repository<Class>>,
        students: Arc<dyn Repository<Student>>,
        parents: Arc<dyn Repository<Parent>>,
    ) -> Self {
        let teachers = TeacherService::new(teachers);
        let parents = ParentService::new(parents);
        let students = StudentService::new(students, parents.clone(), Arc::clone(&classes));
        let classes = ClassService::new(classes, teachers.clone(), students.clone());

        Self {
            teachers,
            classes,
            students,
            parents,
        }
    }

    /// Services over empty process-local stores.
    pub fn memory() -> Self {
        Self::new(
            Arc::new(InMemoryRepository::<Teacher>::new()),
            Arc::new(InMemoryRepository::<Class>::new()),
            Arc::new(InMemoryRepository::<Student>::new()),
            Arc::new(InMemoryRepository::<Parent>::new()),
        )
    }

    /// Services over the PostgreSQL document table.
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgDocumentRepository::<Teacher>::new(pool.clone())),
            Arc::new(PgDocumentRepository::<Class>::new(pool.clone())),
            Arc::new(PgDocumentRepository::<Student>::new(pool.clone())),
            Arc::new(PgDocumentRepository::<Parent>::new(pool)),
        )
    }

    /// Deletes a teacher unless a class is still assigned to them.
    #[instrument(skip(self))]
    pub async fn remove_teacher(&self, id: TeacherId) -> Result<(), DomainError> {
        self.teachers.find_by_id(id).await?;

        let classes = self.classes.list_by("teacher", json!(id)).await?;
        if !classes.is_empty() {
            return Err(DomainError::dependency_conflict(
                EntityKind::Teacher,
                id,
                EntityKind::Class,
            ));
        }

        self.teachers.remove(id).await
    }

    /// Deletes a parent unless a student still lists them.
    #[instrument(skip(self))]
    pub async fn remove_parent(&self, id: ParentId) -> Result<(), DomainError> {
        self.parents.find_by_id(id).await?;

        let students = self.students.list_by("parents", json!(id)).await?;
        if !students.is_empty() {
            return Err(DomainError::dependency_conflict(
                EntityKind::Parent,
                id,
                EntityKind::Student,
            ));
        }

        self.parents.remove(id).await
    }

    pub async fn remove_class(&self, id: ClassId) -> Result<(), DomainError> {
        self.classes.remove(id).await
    }

    /// Students hold no inbound references, so nothing can lock them.
    pub async fn remove_student(&self, id: StudentId) -> Result<(), DomainError> {
        self.students.remove(id).await
    }

    #[instrument(skip(self))]
    pub async fn parent_students(&self, id: ParentId) -> Result<Vec<Student>, DomainError> {
        self.parents.find_by_id(id).await?;
        self.students.list_by("parents", json!(id)).await
    }

    #[instrument(skip(self))]
    pub async fn teacher_classes(&self, id: TeacherId) -> Result<Vec<Class>, DomainError> {
        self.teachers.find_by_id(id).await?;
        self.classes.list_by("teacher", json!(id)).await
    }

    /// Students enrolled in any class the teacher is assigned to.
    #[instrument(skip(self))]
    pub async fn teacher_students(&self, id: TeacherId) -> Result<Vec<Student>, DomainError> {
        let classes = self.teacher_classes(id).await?;
        if classes.is_empty() {
            return Ok(Vec::new());
        }

        let class_ids: Vec<Value> = classes.iter().map(|class| json!(class.id)).collect();
        self.students.list_by("class", Value::Array(class_ids)).await
    }
}
