//! Application services for workspace role management.

mod roles;

pub use roles::{AssignRoleRequest, RoleService, RoleServiceError, RoleServiceResult};
