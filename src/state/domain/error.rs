//! Error types for state document validation.

use thiserror::Error;

/// Errors returned while constructing state documents.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateDomainError {
    /// The state value is absent, `null` or otherwise falsy.
    #[error("state is required")]
    MissingState,

    /// The state value is not a JSON object.
    #[error("state must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}
