//! Fallback roles applied while resolving a caller.

use super::Role;

/// Roles handed out when no explicit assignment decides the outcome.
///
/// The default grants `admin` in every branch, including a failed lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleResolutionPolicy {
    /// Role for a request that carries no user email. No lookup is made.
    pub missing_identity: Role,
    /// Role for a user with no assignment row in the workspace.
    pub unassigned: Role,
    /// Role used when the assignment lookup itself fails.
    pub lookup_failure: Role,
}

impl RoleResolutionPolicy {
    /// Least-privilege policy: every fallback branch yields `member`.
    #[must_use]
    pub const fn least_privilege() -> Self {
        Self {
            missing_identity: Role::Member,
            unassigned: Role::Member,
            lookup_failure: Role::Member,
        }
    }
}

impl Default for RoleResolutionPolicy {
    fn default() -> Self {
        Self {
            missing_identity: Role::Admin,
            unassigned: Role::Admin,
            lookup_failure: Role::Admin,
        }
    }
}
