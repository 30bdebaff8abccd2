//! The contract every persisted record implements.

use std::fmt;

use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// The four record types managed by Classbook.
///
/// Used to name the offending type in errors and to pick the document
/// collection a record is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Teacher,
    Class,
    Student,
    Parent,
}

impl EntityKind {
    /// Human readable type name, e.g. `"Teacher"`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Teacher => "Teacher",
            Self::Class => "Class",
            Self::Student => "Student",
            Self::Parent => "Parent",
        }
    }

    /// Name of the document collection holding records of this kind.
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Teacher => "teachers",
            Self::Class => "classes",
            Self::Student => "students",
            Self::Parent => "parents",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated, identity-bearing record that can be stored as a document.
///
/// Entities are immutable by replacement: an update builds a new value with
/// merged fields and the repository upserts it under the same id.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Typed identifier; converts to the `Uuid` the store keys on.
    type Id: Copy + fmt::Debug + fmt::Display + Into<Uuid> + Send + Sync + 'static;

    const KIND: EntityKind;

    /// Stable identifier used as the upsert key.
    fn id(&self) -> Self::Id;

    /// The id as the raw `Uuid` used for storage.
    fn key(&self) -> Uuid {
        self.id().into()
    }
}
