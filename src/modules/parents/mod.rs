pub mod controller;
pub mod router;
pub mod service;

pub use router::init_parents_router;
pub use service::ParentService;
