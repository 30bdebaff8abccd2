//! Student domain models and DTOs.
//!
//! A student belongs to one class and is linked to one or more parents.
//! The parent list is never empty once the student exists; link and unlink
//! operations go through [`Student::with_parents`], which re-checks it.

use chrono::{DateTime, Utc};
use classbook_core::{DomainError, Entity, EntityKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{ClassId, ParentId, StudentId};
use crate::merge::append_unique;

/// A student enrolled in the school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub surname: String,
    pub birth_date: DateTime<Utc>,
    /// Unique business key.
    pub document: String,
    pub blood_type: String,
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
    pub start_date: DateTime<Utc>,
    #[serde(rename = "class")]
    pub class_id: ClassId,
    /// Linked parents; at least one at all times.
    pub parents: Vec<ParentId>,
}

/// DTO for creating a new student.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    /// Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StudentId>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    pub birth_date: DateTime<Utc>,
    #[validate(length(min = 1, max = 50))]
    pub document: String,
    #[validate(length(min = 1, max = 3))]
    pub blood_type: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    pub start_date: DateTime<Utc>,
    #[serde(rename = "class")]
    pub class_id: ClassId,
    #[validate(length(min = 1, message = "a student must have at least one parent"))]
    pub parents: Vec<ParentId>,
}

/// DTO for updating an existing student.
///
/// `allergies` and `medications` are appended to the current lists (values
/// already present are skipped); every other field replaces. `document`,
/// `birthDate` and `parents` cannot be patched; parents change through the
/// link/unlink operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub surname: Option<String>,
    #[validate(length(min = 1, max = 3))]
    pub blood_type: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub medications: Option<Vec<String>>,
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, rename = "class")]
    pub class_id: Option<ClassId>,
}

/// Body of the link-parents operation.
///
/// Emptiness is checked by the service so that it reports a bad request
/// rather than a payload validation error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LinkParentsDto {
    pub parents: Vec<ParentId>,
}

impl Student {
    /// Validates `dto` and builds the student, generating an id if needed.
    pub fn new(dto: CreateStudentDto) -> Result<Self, DomainError> {
        dto.validate()?;

        Ok(Self {
            id: dto.id.unwrap_or_default(),
            first_name: dto.first_name,
            surname: dto.surname,
            birth_date: dto.birth_date,
            document: dto.document,
            blood_type: dto.blood_type,
            allergies: dto.allergies,
            medications: dto.medications,
            start_date: dto.start_date,
            class_id: dto.class_id,
            parents: dto.parents,
        })
    }

    fn to_create_dto(&self) -> CreateStudentDto {
        let current = self.clone();
        CreateStudentDto {
            id: Some(current.id),
            first_name: current.first_name,
            surname: current.surname,
            birth_date: current.birth_date,
            document: current.document,
            blood_type: current.blood_type,
            allergies: current.allergies,
            medications: current.medications,
            start_date: current.start_date,
            class_id: current.class_id,
            parents: current.parents,
        }
    }

    /// Builds the replacement for this student with `patch` applied.
    pub fn merge(&self, patch: UpdateStudentDto) -> Result<Self, DomainError> {
        patch.validate()?;

        let mut dto = self.to_create_dto();
        if let Some(first_name) = patch.first_name {
            dto.first_name = first_name;
        }
        if let Some(surname) = patch.surname {
            dto.surname = surname;
        }
        if let Some(blood_type) = patch.blood_type {
            dto.blood_type = blood_type;
        }
        if let Some(allergies) = patch.allergies {
            append_unique(&mut dto.allergies, allergies);
        }
        if let Some(medications) = patch.medications {
            append_unique(&mut dto.medications, medications);
        }
        if let Some(start_date) = patch.start_date {
            dto.start_date = start_date;
        }
        if let Some(class_id) = patch.class_id {
            dto.class_id = class_id;
        }

        Self::new(dto)
    }

    /// Builds the replacement for this student linked to exactly `parents`.
    ///
    /// Fails validation when `parents` is empty.
    pub fn with_parents(&self, parents: Vec<ParentId>) -> Result<Self, DomainError> {
        let mut dto = self.to_create_dto();
        dto.parents = parents;
        Self::new(dto)
    }

    pub fn has_parent(&self, parent: ParentId) -> bool {
        self.parents.contains(&parent)
    }
}

impl Entity for Student {
    type Id = StudentId;

    const KIND: EntityKind = EntityKind::Student;

    fn id(&self) -> Self::Id {
        self.id
    }
}
