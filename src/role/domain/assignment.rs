//! Role assignment aggregate and the resolved request caller.

use super::{Role, UserEmail, WorkspaceScope};
use chrono::{DateTime, Utc};
use mockable::Clock;
use uuid::Uuid;

/// A user's role within one workspace.
///
/// At most one assignment exists per `(scope, user_email)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    id: Uuid,
    scope: WorkspaceScope,
    user_email: UserEmail,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted role assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRoleAssignment {
    /// Persisted row identifier.
    pub id: Uuid,
    /// Persisted workspace scope.
    pub scope: WorkspaceScope,
    /// Persisted (already normalized) user email.
    pub user_email: UserEmail,
    /// Persisted role.
    pub role: Role,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl RoleAssignment {
    /// Creates a fresh assignment stamped with the current time.
    ///
    /// When the identity tuple already exists the repository keeps the
    /// stored `id` and `created_at` and takes only the role and
    /// `updated_at` from this value.
    #[must_use]
    pub fn new(
        scope: WorkspaceScope,
        user_email: UserEmail,
        role: Role,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: Uuid::new_v4(),
            scope,
            user_email,
            role,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an assignment from persisted data.
    #[must_use]
    pub fn from_persisted(data: PersistedRoleAssignment) -> Self {
        Self {
            id: data.id,
            scope: data.scope,
            user_email: data.user_email,
            role: data.role,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns a copy carrying the role and update time of `update`.
    #[must_use]
    pub fn with_update_from(&self, update: &Self) -> Self {
        Self {
            role: update.role,
            updated_at: update.updated_at,
            ..self.clone()
        }
    }

    /// Returns the row identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the workspace scope.
    #[must_use]
    pub const fn scope(&self) -> &WorkspaceScope {
        &self.scope
    }

    /// Returns the normalized user email.
    #[must_use]
    pub const fn user_email(&self) -> &UserEmail {
        &self.user_email
    }

    /// Returns the assigned role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Identity and effective role of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    email: Option<UserEmail>,
    role: Role,
}

impl Caller {
    /// Creates a caller with an already resolved role.
    #[must_use]
    pub const fn new(email: Option<UserEmail>, role: Role) -> Self {
        Self { email, role }
    }

    /// Returns the caller email, if the request carried one.
    #[must_use]
    pub const fn email(&self) -> Option<&UserEmail> {
        self.email.as_ref()
    }

    /// Returns the effective role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the task owner key when the caller is a member.
    ///
    /// A member without an email owns only tasks with an empty assignee, so
    /// the key is then the empty string. Non-member roles yield `None`.
    #[must_use]
    pub fn member_email(&self) -> Option<&str> {
        self.role
            .is_member()
            .then(|| self.email.as_ref().map_or("", UserEmail::as_str))
    }
}
