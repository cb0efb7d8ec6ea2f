//! `PostgreSQL` adapters for workspace state persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresStateRepository;
