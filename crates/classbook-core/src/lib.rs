//! # Classbook Core
//!
//! Core types, errors, and utilities for the Classbook API.
//!
//! This crate provides foundational types used throughout the Classbook application:
//!
//! - [`entity`]: The [`Entity`] contract shared by every stored record and the
//!   [`EntityKind`] tag used in error messages and collection names
//! - [`errors`]: The domain error taxonomy and its HTTP response conversion
//! - [`pagination`]: Page-based slicing for list endpoints
//! - [`serde`]: Custom serde serialization/deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use classbook_core::errors::{AppError, DomainError};
//! use classbook_core::entity::EntityKind;
//! use classbook_core::pagination::{slice_page, PageParams};
//!
//! // Raise a typed failure from a service
//! let error = DomainError::not_found(EntityKind::Teacher, "0d9c...");
//!
//! // Controllers convert it into an HTTP response
//! let response: AppError = error.into();
//!
//! // Slice a list for the requested page
//! let params = PageParams::default();
//! let page = slice_page(vec![1, 2, 3], params.page(), params.per_page());
//! ```

pub mod entity;
pub mod errors;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use entity::{Entity, EntityKind};
pub use errors::{AppError, DomainError, ErrorResponse};
pub use pagination::PageParams;
