//! Diesel row models for workspace state persistence.

use super::schema::workspace_states;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for workspace state.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = workspace_states)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StateRow {
    /// Tenant location identifier.
    pub location_id: String,
    /// Workspace identifier.
    pub workspace_id: String,
    /// Full state document.
    pub state_json: Value,
    /// Time of the latest write.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for workspace state.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = workspace_states)]
pub struct NewStateRow {
    /// Tenant location identifier.
    pub location_id: String,
    /// Workspace identifier.
    pub workspace_id: String,
    /// Full state document.
    pub state_json: Value,
    /// Time of the latest write.
    pub updated_at: DateTime<Utc>,
}
