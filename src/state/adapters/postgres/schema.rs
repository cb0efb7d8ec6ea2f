//! Diesel schema for workspace state persistence.

diesel::table! {
    /// One state document per workspace.
    workspace_states (location_id, workspace_id) {
        /// Tenant location identifier.
        location_id -> Text,
        /// Workspace identifier within the location.
        workspace_id -> Text,
        /// Full state document.
        state_json -> Jsonb,
        /// Time of the latest write.
        updated_at -> Timestamptz,
    }
}
