//! `PostgreSQL` repository implementation for workspace state documents.

use super::{
    models::{NewStateRow, StateRow},
    schema::workspace_states,
};
use crate::db::PgPool;
use crate::role::domain::{LocationId, WorkspaceId, WorkspaceScope};
use crate::state::{
    domain::{StateDocument, WorkspaceState},
    ports::{StateMerge, StateRepository, StateRepositoryError, StateRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;

/// `PostgreSQL`-backed workspace state repository.
#[derive(Debug, Clone)]
pub struct PostgresStateRepository {
    pool: PgPool,
}

impl PostgresStateRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StateRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StateRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StateRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StateRepositoryError::persistence)?
    }
}

impl From<diesel::result::Error> for StateRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl StateRepository for PostgresStateRepository {
    async fn find(&self, scope: &WorkspaceScope) -> StateRepositoryResult<Option<WorkspaceState>> {
        let lookup_scope = scope.clone();
        self.run_blocking(move |connection| {
            find_row(connection, &lookup_scope, false)?
                .map(row_to_state)
                .transpose()
        })
        .await
    }

    async fn upsert(&self, state: &WorkspaceState) -> StateRepositoryResult<WorkspaceState> {
        let new_row = to_new_row(&state.scope, &state.document, state.updated_at);
        self.run_blocking(move |connection| {
            let row = upsert_row(connection, &new_row)?;
            row_to_state(row)
        })
        .await
    }

    async fn upsert_merged(
        &self,
        scope: &WorkspaceScope,
        updated_at: DateTime<Utc>,
        merge: StateMerge,
    ) -> StateRepositoryResult<WorkspaceState> {
        let lookup_scope = scope.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, StateRepositoryError, _>(|tx_conn| {
                // Locks the row until commit; a first write for the
                // workspace still races on the insert and the later
                // writer wins.
                let current = find_row(tx_conn, &lookup_scope, true)?
                    .map(row_to_state)
                    .transpose()?
                    .map(|state| state.document);
                let document = merge(current);
                let new_row = to_new_row(&lookup_scope, &document, updated_at);
                let row = upsert_row(tx_conn, &new_row)?;
                row_to_state(row)
            })
        })
        .await
    }
}

fn find_row(
    connection: &mut PgConnection,
    scope: &WorkspaceScope,
    lock: bool,
) -> StateRepositoryResult<Option<StateRow>> {
    let query = workspace_states::table
        .filter(workspace_states::location_id.eq(scope.location_id().as_str()))
        .filter(workspace_states::workspace_id.eq(scope.workspace_id().as_str()))
        .select(StateRow::as_select());

    let row = if lock {
        query.for_update().first::<StateRow>(connection).optional()?
    } else {
        query.first::<StateRow>(connection).optional()?
    };
    Ok(row)
}

fn upsert_row(
    connection: &mut PgConnection,
    new_row: &NewStateRow,
) -> StateRepositoryResult<StateRow> {
    let row = diesel::insert_into(workspace_states::table)
        .values(new_row)
        .on_conflict((workspace_states::location_id, workspace_states::workspace_id))
        .do_update()
        .set((
            workspace_states::state_json.eq(excluded(workspace_states::state_json)),
            workspace_states::updated_at.eq(excluded(workspace_states::updated_at)),
        ))
        .returning(StateRow::as_returning())
        .get_result::<StateRow>(connection)?;
    Ok(row)
}

fn to_new_row(
    scope: &WorkspaceScope,
    document: &StateDocument,
    updated_at: DateTime<Utc>,
) -> NewStateRow {
    NewStateRow {
        location_id: scope.location_id().as_str().to_owned(),
        workspace_id: scope.workspace_id().as_str().to_owned(),
        state_json: document.clone().into_value(),
        updated_at,
    }
}

fn row_to_state(row: StateRow) -> StateRepositoryResult<WorkspaceState> {
    let StateRow {
        location_id,
        workspace_id,
        state_json,
        updated_at,
    } = row;

    let scope = WorkspaceScope::new(
        LocationId::new(location_id).map_err(StateRepositoryError::persistence)?,
        WorkspaceId::new(workspace_id).map_err(StateRepositoryError::persistence)?,
    );
    let document = StateDocument::try_from(state_json)
        .map_err(|_| StateRepositoryError::CorruptDocument(scope.clone()))?;

    Ok(WorkspaceState {
        scope,
        document,
        updated_at,
    })
}
