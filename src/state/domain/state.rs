//! Persisted workspace state and the caller-facing snapshot.

use super::StateDocument;
use crate::role::domain::{Role, WorkspaceScope};
use chrono::{DateTime, Utc};

/// The stored state row of one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceState {
    /// Workspace the document belongs to.
    pub scope: WorkspaceScope,
    /// Full, unfiltered document.
    pub document: StateDocument,
    /// Time of the latest write.
    pub updated_at: DateTime<Utc>,
}

/// Workspace state as returned to one caller.
///
/// `document` and `updated_at` are both `None` when the workspace has
/// never been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// Effective role the document was filtered for.
    pub role: Role,
    /// Document visible to the caller.
    pub document: Option<StateDocument>,
    /// Time of the latest write.
    pub updated_at: Option<DateTime<Utc>>,
}
