//! `PostgreSQL` repository implementation for role assignments.

use super::{
    models::{NewRoleRow, RoleRow},
    schema::workspace_roles,
};
use crate::db::PgPool;
use crate::role::{
    domain::{
        LocationId, PersistedRoleAssignment, Role, RoleAssignment, UserEmail, WorkspaceId,
        WorkspaceScope,
    },
    ports::{RoleRepository, RoleRepositoryError, RoleRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;

/// `PostgreSQL`-backed role repository.
#[derive(Debug, Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RoleRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RoleRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RoleRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RoleRepositoryError::persistence)?
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn list(&self, scope: &WorkspaceScope) -> RoleRepositoryResult<Vec<RoleAssignment>> {
        let location_id = scope.location_id().as_str().to_owned();
        let workspace_id = scope.workspace_id().as_str().to_owned();
        self.run_blocking(move |connection| {
            let rows = workspace_roles::table
                .filter(workspace_roles::location_id.eq(&location_id))
                .filter(workspace_roles::workspace_id.eq(&workspace_id))
                .order((
                    workspace_roles::role.asc(),
                    workspace_roles::user_email.asc(),
                ))
                .select(RoleRow::as_select())
                .load::<RoleRow>(connection)
                .map_err(RoleRepositoryError::persistence)?;
            rows.into_iter().map(row_to_assignment).collect()
        })
        .await
    }

    async fn find(
        &self,
        scope: &WorkspaceScope,
        user_email: &UserEmail,
    ) -> RoleRepositoryResult<Option<RoleAssignment>> {
        let location_id = scope.location_id().as_str().to_owned();
        let workspace_id = scope.workspace_id().as_str().to_owned();
        let email = user_email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = workspace_roles::table
                .filter(workspace_roles::location_id.eq(&location_id))
                .filter(workspace_roles::workspace_id.eq(&workspace_id))
                .filter(workspace_roles::user_email.eq(&email))
                .select(RoleRow::as_select())
                .first::<RoleRow>(connection)
                .optional()
                .map_err(RoleRepositoryError::persistence)?;
            row.map(row_to_assignment).transpose()
        })
        .await
    }

    async fn upsert(&self, assignment: &RoleAssignment) -> RoleRepositoryResult<RoleAssignment> {
        let new_row = to_new_row(assignment);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(workspace_roles::table)
                .values(&new_row)
                .on_conflict((
                    workspace_roles::location_id,
                    workspace_roles::workspace_id,
                    workspace_roles::user_email,
                ))
                .do_update()
                .set((
                    workspace_roles::role.eq(excluded(workspace_roles::role)),
                    workspace_roles::updated_at.eq(excluded(workspace_roles::updated_at)),
                ))
                .returning(RoleRow::as_returning())
                .get_result::<RoleRow>(connection)
                .map_err(RoleRepositoryError::persistence)?;
            row_to_assignment(row)
        })
        .await
    }

    async fn remove(
        &self,
        scope: &WorkspaceScope,
        user_email: &UserEmail,
    ) -> RoleRepositoryResult<bool> {
        let location_id = scope.location_id().as_str().to_owned();
        let workspace_id = scope.workspace_id().as_str().to_owned();
        let email = user_email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(
                workspace_roles::table
                    .filter(workspace_roles::location_id.eq(&location_id))
                    .filter(workspace_roles::workspace_id.eq(&workspace_id))
                    .filter(workspace_roles::user_email.eq(&email)),
            )
            .execute(connection)
            .map_err(RoleRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn to_new_row(assignment: &RoleAssignment) -> NewRoleRow {
    NewRoleRow {
        id: assignment.id(),
        location_id: assignment.scope().location_id().as_str().to_owned(),
        workspace_id: assignment.scope().workspace_id().as_str().to_owned(),
        user_email: assignment.user_email().as_str().to_owned(),
        role: assignment.role().as_str().to_owned(),
        created_at: assignment.created_at(),
        updated_at: assignment.updated_at(),
    }
}

fn row_to_assignment(row: RoleRow) -> RoleRepositoryResult<RoleAssignment> {
    let RoleRow {
        id,
        location_id,
        workspace_id,
        user_email: persisted_email,
        role: persisted_role,
        created_at,
        updated_at,
    } = row;

    let scope = WorkspaceScope::new(
        LocationId::new(location_id).map_err(RoleRepositoryError::persistence)?,
        WorkspaceId::new(workspace_id).map_err(RoleRepositoryError::persistence)?,
    );
    let user_email = UserEmail::new(persisted_email).map_err(RoleRepositoryError::persistence)?;
    let role = Role::try_from(persisted_role.as_str()).map_err(RoleRepositoryError::persistence)?;

    Ok(RoleAssignment::from_persisted(PersistedRoleAssignment {
        id,
        scope,
        user_email,
        role,
        created_at,
        updated_at,
    }))
}
