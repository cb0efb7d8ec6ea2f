//! Port contracts for workspace role assignments.
//!
//! Ports define infrastructure-agnostic interfaces used by role services.

pub mod repository;

pub use repository::{RoleRepository, RoleRepositoryError, RoleRepositoryResult};
