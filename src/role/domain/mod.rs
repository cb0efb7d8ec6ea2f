//! Domain model for workspace role assignments.
//!
//! Role values, workspace scoping identifiers and the caller-resolution
//! policy live here, free of any persistence concerns.

mod assignment;
mod error;
mod ids;
mod policy;
mod role;

pub use assignment::{Caller, PersistedRoleAssignment, RoleAssignment};
pub use error::{ParseRoleError, RoleDomainError};
pub use ids::{LocationId, UserEmail, WorkspaceId, WorkspaceScope};
pub use policy::RoleResolutionPolicy;
pub use role::Role;
