//! In-memory adapters for role assignments.

mod repository;

pub use repository::InMemoryRoleRepository;
