//! Repository port for workspace state documents.

use crate::role::domain::WorkspaceScope;
use crate::state::domain::{StateDocument, WorkspaceState};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for state repository operations.
pub type StateRepositoryResult<T> = Result<T, StateRepositoryError>;

/// Computes the document to store from the currently stored one.
pub type StateMerge = Box<dyn FnOnce(Option<StateDocument>) -> StateDocument + Send>;

/// Workspace state persistence contract.
///
/// Exactly one row exists per workspace once it has been written.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Finds the stored state of a workspace.
    ///
    /// Returns `None` when the workspace has never been written.
    async fn find(&self, scope: &WorkspaceScope) -> StateRepositoryResult<Option<WorkspaceState>>;

    /// Inserts the state, or replaces the document and update timestamp of
    /// the existing row. Returns the stored row.
    async fn upsert(&self, state: &WorkspaceState) -> StateRepositoryResult<WorkspaceState>;

    /// Reads the stored document and writes `merge(stored)` in its place.
    ///
    /// Concurrent writers of an existing row are serialised between the
    /// read and the write. Returns the stored row.
    async fn upsert_merged(
        &self,
        scope: &WorkspaceScope,
        updated_at: DateTime<Utc>,
        merge: StateMerge,
    ) -> StateRepositoryResult<WorkspaceState>;
}

/// Errors returned by state repository implementations.
#[derive(Debug, Clone, Error)]
pub enum StateRepositoryError {
    /// The stored document is not a JSON object.
    #[error("stored state for {0} is not a JSON object")]
    CorruptDocument(WorkspaceScope),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StateRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
