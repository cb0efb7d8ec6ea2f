//! In-memory repository for role assignments.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::role::{
    domain::{RoleAssignment, UserEmail, WorkspaceScope},
    ports::{RoleRepository, RoleRepositoryError, RoleRepositoryResult},
};

type AssignmentKey = (WorkspaceScope, UserEmail);

/// Thread-safe in-memory role repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleRepository {
    assignments: Arc<RwLock<BTreeMap<AssignmentKey, RoleAssignment>>>,
}

impl InMemoryRoleRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> RoleRepositoryError {
    RoleRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn list(&self, scope: &WorkspaceScope) -> RoleRepositoryResult<Vec<RoleAssignment>> {
        let assignments = self.assignments.read().map_err(lock_error)?;
        let mut rows: Vec<RoleAssignment> = assignments
            .values()
            .filter(|assignment| assignment.scope() == scope)
            .cloned()
            .collect();
        rows.sort_by(|left, right| {
            left.role()
                .as_str()
                .cmp(right.role().as_str())
                .then_with(|| left.user_email().cmp(right.user_email()))
        });
        Ok(rows)
    }

    async fn find(
        &self,
        scope: &WorkspaceScope,
        user_email: &UserEmail,
    ) -> RoleRepositoryResult<Option<RoleAssignment>> {
        let assignments = self.assignments.read().map_err(lock_error)?;
        Ok(assignments
            .get(&(scope.clone(), user_email.clone()))
            .cloned())
    }

    async fn upsert(&self, assignment: &RoleAssignment) -> RoleRepositoryResult<RoleAssignment> {
        let mut assignments = self.assignments.write().map_err(lock_error)?;
        let key = (assignment.scope().clone(), assignment.user_email().clone());
        let stored = assignments.get(&key).map_or_else(
            || assignment.clone(),
            |existing| existing.with_update_from(assignment),
        );
        assignments.insert(key, stored.clone());
        Ok(stored)
    }

    async fn remove(
        &self,
        scope: &WorkspaceScope,
        user_email: &UserEmail,
    ) -> RoleRepositoryResult<bool> {
        let mut assignments = self.assignments.write().map_err(lock_error)?;
        Ok(assignments
            .remove(&(scope.clone(), user_email.clone()))
            .is_some())
    }
}
