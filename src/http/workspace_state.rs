//! Handlers for `/api/workspace-state`.

use super::request::{WorkspaceQuery, parse_body, present};
use super::{ApiError, Readiness};
use crate::role::domain::{Role, WorkspaceScope};
use crate::state::{
    domain::{StateDocument, StateDomainError, StateSnapshot},
    services::StateServiceError,
};
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const READ_ROUTE: &str = "GET /api/workspace-state";
const WRITE_ROUTE: &str = "POST /api/workspace-state";
const REQUIRED_IN_BODY: &str = "locationId, workspaceId, and state are required in body";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteStateBody {
    location_id: Option<String>,
    workspace_id: Option<String>,
    state: Option<Value>,
    user_email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StateResponse {
    ok: bool,
    role: Role,
    state: Option<StateDocument>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<StateSnapshot> for StateResponse {
    fn from(snapshot: StateSnapshot) -> Self {
        Self {
            ok: true,
            role: snapshot.role,
            state: snapshot.document,
            updated_at: snapshot.updated_at,
        }
    }
}

pub(super) async fn read(
    State(readiness): State<Readiness>,
    query_result: Result<Query<WorkspaceQuery>, QueryRejection>,
) -> Result<Json<StateResponse>, ApiError> {
    let services = readiness.services()?;
    let Query(params) = query_result.map_err(|err| ApiError::validation(err.body_text()))?;
    let (Some(location_id), Some(workspace_id)) =
        (present(params.location_id), present(params.workspace_id))
    else {
        return Err(ApiError::validation(
            "locationId and workspaceId query params are required",
        ));
    };
    let scope = WorkspaceScope::from_parts(location_id, workspace_id)
        .map_err(|err| ApiError::validation(err.to_string()))?;

    let caller = services
        .roles()
        .resolve_caller(&scope, params.user_email.as_deref())
        .await;
    let snapshot = services
        .states()
        .get(&scope, &caller)
        .await
        .map_err(|err| service_error(READ_ROUTE, err))?;
    Ok(Json(StateResponse::from(snapshot)))
}

pub(super) async fn write(
    State(readiness): State<Readiness>,
    raw: Bytes,
) -> Result<Json<StateResponse>, ApiError> {
    let services = readiness.services()?;
    let body: WriteStateBody =
        parse_body(&raw).ok_or_else(|| ApiError::validation("Invalid JSON in request body"))?;
    let (Some(location_id), Some(workspace_id), Some(state)) = (
        present(body.location_id),
        present(body.workspace_id),
        body.state.filter(|value| !value.is_null()),
    ) else {
        return Err(ApiError::validation(REQUIRED_IN_BODY));
    };
    let scope = WorkspaceScope::from_parts(location_id, workspace_id)
        .map_err(|err| ApiError::validation(err.to_string()))?;

    let caller = services
        .roles()
        .resolve_caller(&scope, body.user_email.as_deref())
        .await;
    let snapshot = services
        .states()
        .put(&scope, state, &caller)
        .await
        .map_err(|err| service_error(WRITE_ROUTE, err))?;
    Ok(Json(StateResponse::from(snapshot)))
}

fn service_error(route: &'static str, err: StateServiceError) -> ApiError {
    match err {
        StateServiceError::Domain(StateDomainError::MissingState) => {
            ApiError::validation(REQUIRED_IN_BODY)
        }
        StateServiceError::Domain(domain) => ApiError::validation(domain.to_string()),
        StateServiceError::Repository(repository) => ApiError::storage(route, &repository),
    }
}
