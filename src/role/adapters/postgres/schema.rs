//! Diesel schema for role assignment persistence.

diesel::table! {
    /// Role assignments, unique per location, workspace and user email.
    workspace_roles (id) {
        /// Row identifier.
        id -> Uuid,
        /// Tenant location identifier.
        location_id -> Text,
        /// Workspace identifier within the location.
        workspace_id -> Text,
        /// Lowercased user email.
        user_email -> Text,
        /// Role name: `admin`, `manager` or `member`.
        #[max_length = 16]
        role -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
