//! `PostgreSQL` adapters for role assignment persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresRoleRepository;
