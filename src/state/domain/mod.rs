//! Domain model for workspace state documents.
//!
//! The document is opaque apart from its optional `tasks` list, which the
//! visibility policy filters and merges for `member` callers.

mod document;
mod error;
mod state;
mod task;
pub mod visibility;

pub use document::{StateDocument, TASKS_FIELD};
pub use error::StateDomainError;
pub use state::{StateSnapshot, WorkspaceState};
pub use task::TaskView;
