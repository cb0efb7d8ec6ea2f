//! Service layer for role assignment and caller role resolution.

use crate::role::{
    domain::{
        Caller, ParseRoleError, Role, RoleAssignment, RoleDomainError, RoleResolutionPolicy,
        UserEmail, WorkspaceScope,
    },
    ports::{RoleRepository, RoleRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for assigning a role to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignRoleRequest {
    location_id: String,
    workspace_id: String,
    user_email: String,
    role: String,
}

impl AssignRoleRequest {
    /// Creates a request from raw input values.
    #[must_use]
    pub fn new(
        location_id: impl Into<String>,
        workspace_id: impl Into<String>,
        user_email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            location_id: location_id.into(),
            workspace_id: workspace_id.into(),
            user_email: user_email.into(),
            role: role.into(),
        }
    }
}

/// Service-level errors for role operations.
#[derive(Debug, Error)]
pub enum RoleServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RoleDomainError),
    /// The requested role is not one of `admin`, `manager` or `member`.
    #[error(transparent)]
    InvalidRole(#[from] ParseRoleError),
    /// No assignment exists for the user in the workspace.
    #[error("role not found for {user_email} in {scope}")]
    NotFound {
        /// Workspace that was searched.
        scope: WorkspaceScope,
        /// User whose assignment was requested.
        user_email: UserEmail,
    },
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RoleRepositoryError),
}

/// Result type for role service operations.
pub type RoleServiceResult<T> = Result<T, RoleServiceError>;

/// Role management and resolution service.
pub struct RoleService<R, C>
where
    R: RoleRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    policy: RoleResolutionPolicy,
}

impl<R, C> Clone for RoleService<R, C>
where
    R: RoleRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            policy: self.policy,
        }
    }
}

impl<R, C> RoleService<R, C>
where
    R: RoleRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default resolution policy.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self::with_policy(repository, clock, RoleResolutionPolicy::default())
    }

    /// Creates a service with an explicit resolution policy.
    #[must_use]
    pub const fn with_policy(
        repository: Arc<R>,
        clock: Arc<C>,
        policy: RoleResolutionPolicy,
    ) -> Self {
        Self {
            repository,
            clock,
            policy,
        }
    }

    /// Lists the assignments of a workspace ordered by role, then email.
    ///
    /// # Errors
    ///
    /// Returns [`RoleServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, scope: &WorkspaceScope) -> RoleServiceResult<Vec<RoleAssignment>> {
        Ok(self.repository.list(scope).await?)
    }

    /// Assigns a role, replacing any earlier role of the same user.
    ///
    /// # Errors
    ///
    /// Returns [`RoleServiceError::Domain`] for empty identifiers,
    /// [`RoleServiceError::InvalidRole`] for an unknown role and
    /// [`RoleServiceError::Repository`] when persistence fails.
    pub async fn assign(&self, request: AssignRoleRequest) -> RoleServiceResult<RoleAssignment> {
        let scope = WorkspaceScope::from_parts(request.location_id, request.workspace_id)?;
        let user_email = UserEmail::new(&request.user_email)?;
        let role = Role::try_from(request.role.as_str())?;

        let assignment = RoleAssignment::new(scope, user_email, role, &*self.clock);
        Ok(self.repository.upsert(&assignment).await?)
    }

    /// Removes the assignment of a user.
    ///
    /// Returns `true` once the row has been deleted.
    ///
    /// # Errors
    ///
    /// Returns [`RoleServiceError::NotFound`] when the user has no
    /// assignment and [`RoleServiceError::Repository`] when persistence
    /// fails.
    pub async fn remove(
        &self,
        scope: &WorkspaceScope,
        user_email: &UserEmail,
    ) -> RoleServiceResult<bool> {
        if self.repository.remove(scope, user_email).await? {
            return Ok(true);
        }
        Err(RoleServiceError::NotFound {
            scope: scope.clone(),
            user_email: user_email.clone(),
        })
    }

    /// Resolves the effective role of a caller.
    ///
    /// Never fails: a missing email, a missing assignment and a failing
    /// lookup each yield the corresponding fallback role of the policy.
    pub async fn resolve_caller(&self, scope: &WorkspaceScope, user_email: Option<&str>) -> Caller {
        let Some(email) = user_email.and_then(|raw| UserEmail::new(raw).ok()) else {
            return Caller::new(None, self.policy.missing_identity);
        };

        let role = match self.repository.find(scope, &email).await {
            Ok(Some(assignment)) => assignment.role(),
            Ok(None) => self.policy.unassigned,
            Err(err) => {
                tracing::warn!(
                    %scope,
                    user_email = %email,
                    error = %err,
                    fallback = %self.policy.lookup_failure,
                    "role lookup failed; using fallback role"
                );
                self.policy.lookup_failure
            }
        };
        Caller::new(Some(email), role)
    }
}
