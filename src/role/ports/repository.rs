//! Repository port for role assignment persistence and lookup.

use crate::role::domain::{RoleAssignment, UserEmail, WorkspaceScope};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for role repository operations.
pub type RoleRepositoryResult<T> = Result<T, RoleRepositoryError>;

/// Role assignment persistence contract.
///
/// Every operation touches a single row and relies on the backing store's
/// per-statement atomicity.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Returns all assignments of a workspace ordered by role name, then by
    /// user email.
    async fn list(&self, scope: &WorkspaceScope) -> RoleRepositoryResult<Vec<RoleAssignment>>;

    /// Finds the assignment of one user in a workspace.
    ///
    /// Returns `None` when the user has no assignment.
    async fn find(
        &self,
        scope: &WorkspaceScope,
        user_email: &UserEmail,
    ) -> RoleRepositoryResult<Option<RoleAssignment>>;

    /// Inserts the assignment, or replaces the role and update timestamp of
    /// the existing row for the same `(scope, user_email)`.
    ///
    /// The stored row is returned; on conflict it keeps its original `id`
    /// and `created_at`.
    async fn upsert(&self, assignment: &RoleAssignment) -> RoleRepositoryResult<RoleAssignment>;

    /// Deletes the assignment of one user in a workspace.
    ///
    /// Returns `true` when a row was deleted.
    async fn remove(
        &self,
        scope: &WorkspaceScope,
        user_email: &UserEmail,
    ) -> RoleRepositoryResult<bool>;
}

/// Errors returned by role repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RoleRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoleRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
