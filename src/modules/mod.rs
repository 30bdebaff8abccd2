pub mod base;
pub mod classes;
pub mod parents;
pub mod students;
pub mod teachers;

#[cfg(test)]
pub(crate) mod fixtures;
