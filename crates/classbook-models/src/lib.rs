//! # Classbook Models
//!
//! Domain entities and DTOs for the Classbook API.
//!
//! Every entity is produced only through validated construction: a
//! `Create*Dto` is checked with [`validator`] and turned into the entity by
//! its `new` constructor, which assigns a fresh id when none is supplied.
//! Updates never mutate in place; `merge` builds a replacement from the
//! current state plus an `Update*Dto` and runs the same validation again.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed entity ids
//! - [`address`]: Postal address records owned by parents
//! - [`teachers`]: Teacher entity
//! - [`classes`]: Class entity and the class code format
//! - [`students`]: Student entity and its parent links
//! - [`parents`]: Parent entity
//!
//! # Example
//!
//! ```ignore
//! use classbook_models::classes::{Class, CreateClassDto};
//!
//! let class = Class::new(CreateClassDto {
//!     id: None,
//!     code: "1A-M".to_string(),
//!     teacher: None,
//! })?;
//! ```

pub mod address;
pub mod classes;
pub mod ids;
pub mod parents;
pub mod students;
pub mod teachers;

mod merge;

pub use merge::first_duplicate;

// Re-export commonly used types at crate root for convenience
pub use address::Address;
pub use classes::{Class, CreateClassDto, UpdateClassDto};
pub use ids::{ClassId, ParentId, StudentId, TeacherId};
pub use parents::{AddPhonesDto, CreateParentDto, Parent, UpdateParentDto};
pub use students::{CreateStudentDto, LinkParentsDto, Student, UpdateStudentDto};
pub use teachers::{CreateTeacherDto, Teacher, UpdateTeacherDto};
