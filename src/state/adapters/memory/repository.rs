//! In-memory repository for workspace state documents.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::role::domain::WorkspaceScope;
use crate::state::{
    domain::{StateDocument, WorkspaceState},
    ports::{StateMerge, StateRepository, StateRepositoryError, StateRepositoryResult},
};

/// Thread-safe in-memory state repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateRepository {
    states: Arc<RwLock<HashMap<WorkspaceScope, (StateDocument, DateTime<Utc>)>>>,
}

impl InMemoryStateRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> StateRepositoryError {
    StateRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn find(&self, scope: &WorkspaceScope) -> StateRepositoryResult<Option<WorkspaceState>> {
        let states = self.states.read().map_err(lock_error)?;
        Ok(states
            .get(scope)
            .map(|(document, updated_at)| WorkspaceState {
                scope: scope.clone(),
                document: document.clone(),
                updated_at: *updated_at,
            }))
    }

    async fn upsert(&self, state: &WorkspaceState) -> StateRepositoryResult<WorkspaceState> {
        let mut states = self.states.write().map_err(lock_error)?;
        states.insert(
            state.scope.clone(),
            (state.document.clone(), state.updated_at),
        );
        Ok(state.clone())
    }

    async fn upsert_merged(
        &self,
        scope: &WorkspaceScope,
        updated_at: DateTime<Utc>,
        merge: StateMerge,
    ) -> StateRepositoryResult<WorkspaceState> {
        let mut states = self.states.write().map_err(lock_error)?;
        let current = states.get(scope).map(|(document, _)| document.clone());
        let document = merge(current);
        states.insert(scope.clone(), (document.clone(), updated_at));
        Ok(WorkspaceState {
            scope: scope.clone(),
            document,
            updated_at,
        })
    }
}
