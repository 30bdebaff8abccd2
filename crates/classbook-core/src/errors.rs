//! Domain error taxonomy and its HTTP response conversion.
//!
//! Services return [`DomainError`]; every variant names the entity type and
//! the locator involved so callers can tell "not found" apart from "still
//! referenced" apart from "business rule violated" without parsing messages.
//!
//! Transport layers translate a [`DomainError`] into their own vocabulary:
//! the REST layer converts it into an [`AppError`] (status code plus JSON
//! body), the CLI uses [`DomainError::exit_code`].
//!
//! # Example JSON Response
//!
//! ```json
//! {
//!   "code": "CONFLICT",
//!   "name": "ClassError",
//!   "message": "Class with locator \"1A-M\" already exists"
//! }
//! ```

use std::fmt::Display;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::entity::EntityKind;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The requested entity id does not exist.
    #[error("{entity} with locator {locator:?} could not be found")]
    NotFound { entity: EntityKind, locator: String },

    /// A uniqueness constraint (document, class code) is already taken.
    #[error("{entity} with locator {locator:?} already exists")]
    Conflict { entity: EntityKind, locator: String },

    /// Deletion blocked because `dependent` records still reference this one.
    #[error(
        "{entity} with locator {locator:?} cannot be removed because {dependent} records still depend on it"
    )]
    DependencyConflict {
        entity: EntityKind,
        locator: String,
        dependent: EntityKind,
    },

    /// A relationship field of `dependent` points to nothing resolvable.
    #[error("{searched} could not be found in {dependent} with locator {locator:?}")]
    MissingDependency {
        searched: EntityKind,
        locator: String,
        dependent: EntityKind,
    },

    /// Unlinking would leave a student without any parent.
    #[error(
        "Parent with locator {parents:?} could not be removed because Student {student:?} must have at least one parent"
    )]
    StudentMustHaveAtLeastOneParent {
        student: String,
        parents: Vec<String>,
    },

    /// Malformed input to a relationship-mutating operation.
    #[error("{message}")]
    BadRequest { entity: EntityKind, message: String },

    /// Field-level validation failures collected while constructing an entity.
    #[error("invalid payload: {0}")]
    Validation(#[from] ValidationErrors),

    /// The backing store failed; not a user-actionable condition.
    #[error("storage failure: {0}")]
    Storage(#[from] Error),
}

impl DomainError {
    pub fn not_found(entity: EntityKind, locator: impl Display) -> Self {
        Self::NotFound {
            entity,
            locator: locator.to_string(),
        }
    }

    pub fn conflict(entity: EntityKind, locator: impl Display) -> Self {
        Self::Conflict {
            entity,
            locator: locator.to_string(),
        }
    }

    pub fn dependency_conflict(
        entity: EntityKind,
        locator: impl Display,
        dependent: EntityKind,
    ) -> Self {
        Self::DependencyConflict {
            entity,
            locator: locator.to_string(),
            dependent,
        }
    }

    pub fn missing_dependency(
        searched: EntityKind,
        locator: impl Display,
        dependent: EntityKind,
    ) -> Self {
        Self::MissingDependency {
            searched,
            locator: locator.to_string(),
            dependent,
        }
    }

    pub fn bad_request(entity: EntityKind, message: impl Into<String>) -> Self {
        Self::BadRequest {
            entity,
            message: message.into(),
        }
    }

    /// Machine-readable code carried in every error payload.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::DependencyConflict { .. } => "DEPENDENCY_LOCK",
            Self::MissingDependency { .. } => "MISSING_DEPENDENCY",
            Self::StudentMustHaveAtLeastOneParent { .. } => "STUDENT_MUST_HAVE_PARENT",
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::Validation(_) => "INVALID_PAYLOAD",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// The entity type the error is about, when there is one.
    pub fn entity(&self) -> Option<EntityKind> {
        match self {
            Self::NotFound { entity, .. }
            | Self::Conflict { entity, .. }
            | Self::DependencyConflict { entity, .. }
            | Self::BadRequest { entity, .. } => Some(*entity),
            Self::MissingDependency { searched, .. } => Some(*searched),
            Self::StudentMustHaveAtLeastOneParent { .. } => Some(EntityKind::Student),
            Self::Validation(_) | Self::Storage(_) => None,
        }
    }

    /// Error name in the `<Entity>Error` form, e.g. `"ParentError"`.
    pub fn name(&self) -> String {
        match self.entity() {
            Some(entity) => format!("{}Error", entity),
            None => match self {
                Self::Validation(_) => "ValidationError".to_string(),
                _ => "StorageError".to_string(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } | Self::MissingDependency { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. }
            | Self::DependencyConflict { .. }
            | Self::StudentMustHaveAtLeastOneParent { .. } => StatusCode::CONFLICT,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Storage(_) => 1,
            Self::BadRequest { .. } | Self::Validation(_) => 2,
            Self::NotFound { .. } | Self::MissingDependency { .. } => 3,
            Self::Conflict { .. }
            | Self::DependencyConflict { .. }
            | Self::StudentMustHaveAtLeastOneParent { .. } => 4,
        }
    }
}

/// Shape of every error body, for API documentation.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "NOT_FOUND")]
    pub code: String,
    #[schema(example = "TeacherError")]
    pub name: String,
    pub message: String,
    /// Field-level failures, present on `INVALID_PAYLOAD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub code: &'static str,
    pub name: String,
    pub error: Error,
    pub details: Option<Value>,
}

fn default_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::CONFLICT => "CONFLICT",
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNPROCESSABLE_ENTITY => "INVALID_PAYLOAD",
        _ => "UNKNOWN_ERROR",
    }
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            code: default_code(status),
            name: "Error".to_string(),
            error: err.into(),
            details: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "code": self.code,
            "name": self.name,
            "message": self.error.to_string(),
        });

        if let Some(details) = self.details {
            body["errors"] = details;
        }

        (self.status, Json(body)).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let details = match &err {
            DomainError::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        Self {
            status: err.status(),
            code: err.code(),
            name: err.name(),
            error: err.into(),
            details,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::from(errors).into()
    }
}
