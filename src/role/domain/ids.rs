//! Identifier and validated scalar types shared by the workspace stores.

use super::RoleDomainError;
use serde::Serialize;
use std::fmt;

/// Top-level tenant identifier grouping one or more workspaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    /// Creates a validated location identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RoleDomainError::EmptyLocationId`] when the value is empty
    /// or whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, RoleDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(RoleDomainError::EmptyLocationId);
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Workspace identifier, unique within a location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    /// Creates a validated workspace identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RoleDomainError::EmptyWorkspaceId`] when the value is empty
    /// or whitespace only.
    pub fn new(value: impl Into<String>) -> Result<Self, RoleDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(RoleDomainError::EmptyWorkspaceId);
        }
        Ok(Self(raw))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of one workspace: the pair every role and state row is scoped by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WorkspaceScope {
    location_id: LocationId,
    workspace_id: WorkspaceId,
}

impl WorkspaceScope {
    /// Creates a scope from validated identifiers.
    #[must_use]
    pub const fn new(location_id: LocationId, workspace_id: WorkspaceId) -> Self {
        Self {
            location_id,
            workspace_id,
        }
    }

    /// Creates a scope from raw identifier strings.
    ///
    /// # Errors
    ///
    /// Returns [`RoleDomainError`] when either identifier is empty.
    pub fn from_parts(
        location_id: impl Into<String>,
        workspace_id: impl Into<String>,
    ) -> Result<Self, RoleDomainError> {
        Ok(Self::new(
            LocationId::new(location_id)?,
            WorkspaceId::new(workspace_id)?,
        ))
    }

    /// Returns the location identifier.
    #[must_use]
    pub const fn location_id(&self) -> &LocationId {
        &self.location_id
    }

    /// Returns the workspace identifier.
    #[must_use]
    pub const fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }
}

impl fmt::Display for WorkspaceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.location_id, self.workspace_id)
    }
}

/// User email address, normalized to lowercase.
///
/// Two addresses that differ only in letter case are the same user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserEmail(String);

impl UserEmail {
    /// Creates a normalized email.
    ///
    /// # Errors
    ///
    /// Returns [`RoleDomainError::EmptyUserEmail`] when the value is empty
    /// or whitespace only.
    pub fn new(value: impl AsRef<str>) -> Result<Self, RoleDomainError> {
        let raw = value.as_ref();
        if raw.trim().is_empty() {
            return Err(RoleDomainError::EmptyUserEmail);
        }
        Ok(Self(raw.to_lowercase()))
    }

    /// Returns the normalized address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
