//! # Classbook API
//!
//! A school-records backend built with Rust and Axum. It keeps four kinds of
//! records (teachers, classes, students and parents) in a schemaless
//! document store and enforces the references between them on every write.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli/              # classbook-cli commands and the fake-data seeder
//! ├── modules/          # Feature modules
//! │   ├── base.rs       # Generic CRUD over a Repository<E>
//! │   ├── teachers/
//! │   ├── classes/
//! │   ├── students/
//! │   └── parents/
//! ├── services.rs       # Service wiring and cross-entity operations
//! ├── router.rs         # HTTP routes, docs, CORS
//! └── state.rs          # Shared application state
//! ```
//!
//! Each feature module follows the same structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Reference checks and business rules
//! - `router.rs`: Axum router configuration
//!
//! Entities and DTOs live in `classbook-models`, the repository port and its
//! backends in `classbook-db`.
//!
//! ## References
//!
//! ```text
//! Class.teacher ──► Teacher      (optional)
//! Student.class ──► Class        (required)
//! Student.parents ──► Parent     (one or more)
//! ```
//!
//! A record cannot be deleted while another record still points at it, and a
//! write is rejected when it points at a record that does not exist.
//!
//! ## Quick Start
//!
//! ```bash
//! STORAGE_BACKEND=memory cargo run --bin classbook
//! cargo run --bin classbook-cli -- seed --teachers 3
//! ```
//!
//! When the server is running, the API reference is served at `/scalar` and
//! the raw document at `/api-docs/openapi.json`.

pub mod cli;
pub mod docs;
pub mod logging;
pub mod modules;
pub mod router;
pub mod services;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use classbook_config;
pub use classbook_core;
pub use classbook_db;
pub use classbook_models;
