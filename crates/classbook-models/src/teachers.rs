//! Teacher entity and DTOs.

use chrono::{DateTime, Utc};
use classbook_core::{DomainError, Entity, EntityKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::TeacherId;

/// A teacher employed by the school.
///
/// Teachers own no relationships; the classes they teach are found through
/// an inverse lookup on `Class.teacher`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    pub first_name: String,
    pub surname: String,
    /// Unique business key.
    pub document: String,
    pub phone: String,
    pub email: String,
    pub hiring_date: DateTime<Utc>,
    pub salary: f64,
    pub major: String,
}

/// DTO for creating a new teacher.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeacherDto {
    /// Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TeacherId>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    #[validate(length(min = 1, max = 50))]
    pub document: String,
    #[validate(length(min = 1, max = 30))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    pub hiring_date: DateTime<Utc>,
    #[validate(range(min = 1.0, message = "salary must be at least 1"))]
    pub salary: f64,
    #[validate(length(min = 1, max = 100))]
    pub major: String,
}

/// DTO for updating an existing teacher.
///
/// `document` and `hiringDate` are fixed at creation and cannot be patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub surname: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 1.0, message = "salary must be at least 1"))]
    pub salary: Option<f64>,
    #[validate(length(min = 1, max = 100))]
    pub major: Option<String>,
}

impl Teacher {
    /// Validates `dto` and builds the teacher, generating an id if needed.
    pub fn new(dto: CreateTeacherDto) -> Result<Self, DomainError> {
        dto.validate()?;

        Ok(Self {
            id: dto.id.unwrap_or_default(),
            first_name: dto.first_name,
            surname: dto.surname,
            document: dto.document,
            phone: dto.phone,
            email: dto.email,
            hiring_date: dto.hiring_date,
            salary: dto.salary,
            major: dto.major,
        })
    }

    /// Builds the replacement for this teacher with `patch` applied.
    pub fn merge(&self, patch: UpdateTeacherDto) -> Result<Self, DomainError> {
        patch.validate()?;

        let current = self.clone();
        Self::new(CreateTeacherDto {
            id: Some(current.id),
            first_name: patch.first_name.unwrap_or(current.first_name),
            surname: patch.surname.unwrap_or(current.surname),
            document: current.document,
            phone: patch.phone.unwrap_or(current.phone),
            email: patch.email.unwrap_or(current.email),
            hiring_date: current.hiring_date,
            salary: patch.salary.unwrap_or(current.salary),
            major: patch.major.unwrap_or(current.major),
        })
    }
}

impl Entity for Teacher {
    type Id = TeacherId;

    const KIND: EntityKind = EntityKind::Teacher;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_dto() -> CreateTeacherDto {
        CreateTeacherDto {
            id: None,
            first_name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            document: "111".to_string(),
            phone: "+55 41 99999-0000".to_string(),
            email: "ada@school.test".to_string(),
            hiring_date: Utc.with_ymd_and_hms(2020, 2, 1, 9, 0, 0).unwrap(),
            salary: 4200.5,
            major: "Mathematics".to_string(),
        }
    }

    #[test]
    fn test_new_generates_id() {
        let a = Teacher::new(create_dto()).unwrap();
        let b = Teacher::new(create_dto()).unwrap();
        assert!(!a.id.is_nil());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_new_keeps_supplied_id() {
        let id = TeacherId::new();
        let teacher = Teacher::new(CreateTeacherDto {
            id: Some(id),
            ..create_dto()
        })
        .unwrap();
        assert_eq!(teacher.id, id);
    }

    #[test]
    fn test_new_rejects_low_salary_and_bad_email() {
        let err = Teacher::new(CreateTeacherDto {
            salary: 0.5,
            email: "not-an-email".to_string(),
            ..create_dto()
        })
        .unwrap_err();

        match err {
            DomainError::Validation(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("salary"));
                assert!(fields.contains_key("email"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_keeps_immutable_fields() {
        let teacher = Teacher::new(create_dto()).unwrap();
        let updated = teacher
            .merge(UpdateTeacherDto {
                major: Some("Physics".to_string()),
                salary: Some(5000.0),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.id, teacher.id);
        assert_eq!(updated.document, teacher.document);
        assert_eq!(updated.hiring_date, teacher.hiring_date);
        assert_eq!(updated.major, "Physics");
        assert_eq!(updated.salary, 5000.0);
        assert_eq!(updated.first_name, "Ada");
    }

    #[test]
    fn test_merge_rejects_invalid_patch() {
        let teacher = Teacher::new(create_dto()).unwrap();
        let result = teacher.merge(UpdateTeacherDto {
            first_name: Some(String::new()),
            ..Default::default()
        });
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_serde_roundtrip() {
        let teacher = Teacher::new(create_dto()).unwrap();
        let json = serde_json::to_string(&teacher).unwrap();
        assert!(json.contains(r#""hiringDate""#));
        let back: Teacher = serde_json::from_str(&json).unwrap();
        assert_eq!(back, teacher);
    }
}
