//! Service layer applying the visibility policy around state reads and
//! writes.

use crate::role::domain::{Caller, WorkspaceScope};
use crate::state::{
    domain::{
        StateDocument, StateDomainError, StateSnapshot, WorkspaceState,
        visibility::{merge_member_write, visible_to_member},
    },
    ports::{StateRepository, StateRepositoryError},
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for state operations.
#[derive(Debug, Error)]
pub enum StateServiceError {
    /// The incoming state failed validation.
    #[error(transparent)]
    Domain(#[from] StateDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] StateRepositoryError),
}

/// Result type for state service operations.
pub type StateServiceResult<T> = Result<T, StateServiceError>;

/// Workspace state synchronisation service.
pub struct StateService<S, C>
where
    S: StateRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> Clone for StateService<S, C>
where
    S: StateRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, C> StateService<S, C>
where
    S: StateRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new state service.
    #[must_use]
    pub const fn new(repository: Arc<S>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Reads the workspace state as the caller may see it.
    ///
    /// A workspace that has never been written yields a snapshot with no
    /// document and no timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StateServiceError::Repository`] when the lookup fails.
    pub async fn get(
        &self,
        scope: &WorkspaceScope,
        caller: &Caller,
    ) -> StateServiceResult<StateSnapshot> {
        let stored = self.repository.find(scope).await?;
        Ok(stored.map_or_else(
            || StateSnapshot {
                role: caller.role(),
                document: None,
                updated_at: None,
            },
            |state| snapshot_for(caller, state),
        ))
    }

    /// Writes the workspace state on behalf of the caller.
    ///
    /// Non-member callers replace the whole document. A member write is
    /// merged into the stored document so that only the member's own tasks
    /// change, and the returned snapshot is filtered to those tasks.
    ///
    /// # Errors
    ///
    /// Returns [`StateServiceError::Domain`] when `incoming` is missing or
    /// not a JSON object, and [`StateServiceError::Repository`] when
    /// persistence fails.
    pub async fn put(
        &self,
        scope: &WorkspaceScope,
        incoming: Value,
        caller: &Caller,
    ) -> StateServiceResult<StateSnapshot> {
        let document = StateDocument::try_from(incoming)?;
        let updated_at = self.clock.utc();

        let stored = match caller.member_email() {
            Some(owner) => {
                let owner_email = owner.to_owned();
                self.repository
                    .upsert_merged(
                        scope,
                        updated_at,
                        Box::new(move |current| {
                            merge_member_write(current, document, &owner_email)
                        }),
                    )
                    .await?
            }
            None => {
                let state = WorkspaceState {
                    scope: scope.clone(),
                    document,
                    updated_at,
                };
                self.repository.upsert(&state).await?
            }
        };
        Ok(snapshot_for(caller, stored))
    }
}

fn snapshot_for(caller: &Caller, state: WorkspaceState) -> StateSnapshot {
    let document = match caller.member_email() {
        Some(owner) => visible_to_member(state.document, owner),
        None => state.document,
    };
    StateSnapshot {
        role: caller.role(),
        document: Some(document),
        updated_at: Some(state.updated_at),
    }
}
