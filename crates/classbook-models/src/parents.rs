//! Parent entity and DTOs.

use classbook_core::{DomainError, Entity, EntityKind};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidateEmail, ValidationError};

use crate::address::Address;
use crate::ids::ParentId;
use crate::merge::append_unique;

/// A parent or guardian of one or more students.
///
/// Parents do not store their students; the link lives on `Student.parents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub id: ParentId,
    pub first_name: String,
    pub surname: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub address: Vec<Address>,
    /// Unique business key.
    pub document: String,
}

fn validate_emails(emails: &[String]) -> Result<(), ValidationError> {
    if emails.iter().all(|email| email.validate_email()) {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("every email must be valid".into()))
    }
}

/// DTO for creating a new parent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateParentDto {
    /// Generated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ParentId>,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub surname: String,
    #[validate(length(min = 1, message = "at least one phone is required"))]
    pub phones: Vec<String>,
    #[validate(
        length(min = 1, message = "at least one email is required"),
        custom(function = "validate_emails")
    )]
    pub emails: Vec<String>,
    #[validate(length(min = 1, message = "at least one address is required"), nested)]
    pub address: Vec<Address>,
    #[validate(length(min = 1, max = 50))]
    pub document: String,
}

/// DTO for updating an existing parent.
///
/// `phones` and `emails` are appended (values already present are skipped),
/// `address` replaces the whole list. `document` cannot be patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParentDto {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub surname: Option<String>,
    pub phones: Option<Vec<String>>,
    #[validate(custom(function = "validate_emails"))]
    pub emails: Option<Vec<String>>,
    #[validate(length(min = 1, message = "at least one address is required"), nested)]
    pub address: Option<Vec<Address>>,
}

/// Body of the add-phones operation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddPhonesDto {
    pub phones: Vec<String>,
}

impl Parent {
    /// Validates `dto` and builds the parent, generating an id if needed.
    pub fn new(dto: CreateParentDto) -> Result<Self, DomainError> {
        dto.validate()?;

        Ok(Self {
            id: dto.id.unwrap_or_default(),
            first_name: dto.first_name,
            surname: dto.surname,
            phones: dto.phones,
            emails: dto.emails,
            address: dto.address,
            document: dto.document,
        })
    }

    /// Builds the replacement for this parent with `patch` applied.
    pub fn merge(&self, patch: UpdateParentDto) -> Result<Self, DomainError> {
        patch.validate()?;

        let current = self.clone();
        let mut phones = current.phones;
        if let Some(incoming) = patch.phones {
            append_unique(&mut phones, incoming);
        }
        let mut emails = current.emails;
        if let Some(incoming) = patch.emails {
            append_unique(&mut emails, incoming);
        }

        Self::new(CreateParentDto {
            id: Some(current.id),
            first_name: patch.first_name.unwrap_or(current.first_name),
            surname: patch.surname.unwrap_or(current.surname),
            phones,
            emails,
            address: patch.address.unwrap_or(current.address),
            document: current.document,
        })
    }

    /// Builds the replacement for this parent with `phones` appended.
    pub fn add_phones(&self, phones: Vec<String>) -> Result<Self, DomainError> {
        self.merge(UpdateParentDto {
            phones: Some(phones),
            ..Default::default()
        })
    }
}

impl Entity for Parent {
    type Id = ParentId;

    const KIND: EntityKind = EntityKind::Parent;

    fn id(&self) -> Self::Id {
        self.id
    }
}
