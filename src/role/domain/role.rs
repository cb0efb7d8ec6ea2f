//! Workspace role values.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Privilege level of a user within one workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to every task in the workspace.
    Admin,
    /// Workspace lead; sees the whole document like an admin.
    Manager,
    /// Sees and edits only the tasks assigned to them.
    Member,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Member => "member",
        }
    }

    /// Returns `true` when the role is restricted to its own tasks.
    #[must_use]
    pub const fn is_member(self) -> bool {
        matches!(self, Self::Member)
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "member" => Ok(Self::Member),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
