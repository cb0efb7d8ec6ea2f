//! Diesel row models for role assignment persistence.

use super::schema::workspace_roles;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for role assignments.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = workspace_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Tenant location identifier.
    pub location_id: String,
    /// Workspace identifier.
    pub workspace_id: String,
    /// Lowercased user email.
    pub user_email: String,
    /// Role name.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for role assignments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = workspace_roles)]
pub struct NewRoleRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Tenant location identifier.
    pub location_id: String,
    /// Workspace identifier.
    pub workspace_id: String,
    /// Lowercased user email.
    pub user_email: String,
    /// Role name.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
