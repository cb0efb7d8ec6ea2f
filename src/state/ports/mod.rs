//! Port contracts for workspace state persistence.

pub mod repository;

pub use repository::{StateMerge, StateRepository, StateRepositoryError, StateRepositoryResult};
