//! Class entity and DTOs.
//!
//! A class code is a grade digit, a section letter between `A` and `H`, and
//! a shift (`M`orning, `T`arde/afternoon, `N`ight), e.g. `1A-M`.

use std::sync::LazyLock;

use classbook_core::serde::double_option;
use classbook_core::{DomainError, Entity, EntityKind};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{ClassId, TeacherId};

static CLASS_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9][A-H]-[MTN]$").expect("class code pattern compiles"));

/// Returns true when `code` has the `digit+letter-shift` form.
pub fn is_valid_class_code(code: &str) -> bool {
    CLASS_CODE.is_match(code)
}

/// A class, optionally taught by one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: ClassId,
    /// Unique class code, e.g. `1A-M`.
    pub code: String,
    /// The teacher in charge; `null` while unassigned.
    pub teacher: Option<TeacherId>,
}

/// DTO for creating a new class.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassDto {
    /// Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ClassId>,
    #[validate(regex(
        path = *CLASS_CODE,
        message = "code must look like 1A-M (grade, section A-H, shift M/T/N)"
    ))]
    #[schema(example = "1A-M")]
    pub code: String,
    #[serde(default)]
    pub teacher: Option<TeacherId>,
}

/// DTO for updating an existing class.
///
/// `teacher` distinguishes a missing key (keep) from `null` (unassign).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassDto {
    #[validate(regex(
        path = *CLASS_CODE,
        message = "code must look like 1A-M (grade, section A-H, shift M/T/N)"
    ))]
    pub code: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub teacher: Option<Option<TeacherId>>,
}

impl Class {
    /// Validates `dto` and builds the class, generating an id if needed.
    pub fn new(dto: CreateClassDto) -> Result<Self, DomainError> {
        dto.validate()?;

        Ok(Self {
            id: dto.id.unwrap_or_default(),
            code: dto.code,
            teacher: dto.teacher,
        })
    }

    /// Builds the replacement for this class with `patch` applied.
    pub fn merge(&self, patch: UpdateClassDto) -> Result<Self, DomainError> {
        patch.validate()?;

        Self::new(CreateClassDto {
            id: Some(self.id),
            code: patch.code.unwrap_or_else(|| self.code.clone()),
            teacher: patch.teacher.unwrap_or(self.teacher),
        })
    }
}

impl Entity for Class {
    type Id = ClassId;

    const KIND: EntityKind = EntityKind::Class;

    fn id(&self) -> Self::Id {
        self.id
    }
}
