//! Error types for role domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing role domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleDomainError {
    /// The location identifier is empty after trimming.
    #[error("locationId must not be empty")]
    EmptyLocationId,

    /// The workspace identifier is empty after trimming.
    #[error("workspaceId must not be empty")]
    EmptyWorkspaceId,

    /// The user email is empty after trimming.
    #[error("userEmail must not be empty")]
    EmptyUserEmail,
}

/// Error returned while parsing a role from request input or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid role: {0}")]
pub struct ParseRoleError(pub String);
