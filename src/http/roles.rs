//! Handlers for `/api/workspace-roles`.

use super::request::{WorkspaceQuery, parse_body, present};
use super::{ApiError, Readiness};
use crate::role::{
    domain::{RoleAssignment, UserEmail, WorkspaceScope},
    services::{AssignRoleRequest, RoleServiceError},
};
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const LIST_ROUTE: &str = "GET /api/workspace-roles";
const ASSIGN_ROUTE: &str = "POST /api/workspace-roles";
const REMOVE_ROUTE: &str = "DELETE /api/workspace-roles";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignRoleBody {
    location_id: Option<String>,
    workspace_id: Option<String>,
    user_email: Option<String>,
    role: Option<String>,
}

/// Role row as exposed over HTTP, keyed by column name.
#[derive(Debug, Serialize)]
struct RoleRow {
    id: Uuid,
    location_id: String,
    workspace_id: String,
    user_email: String,
    role: &'static str,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&RoleAssignment> for RoleRow {
    fn from(assignment: &RoleAssignment) -> Self {
        Self {
            id: assignment.id(),
            location_id: assignment.scope().location_id().as_str().to_owned(),
            workspace_id: assignment.scope().workspace_id().as_str().to_owned(),
            user_email: assignment.user_email().as_str().to_owned(),
            role: assignment.role().as_str(),
            created_at: assignment.created_at(),
            updated_at: assignment.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ListRolesResponse {
    ok: bool,
    roles: Vec<RoleRow>,
}

#[derive(Debug, Serialize)]
pub(super) struct AssignRoleResponse {
    ok: bool,
    role: RoleRow,
}

#[derive(Debug, Serialize)]
pub(super) struct RemoveRoleResponse {
    ok: bool,
    deleted: bool,
}

pub(super) async fn list(
    State(readiness): State<Readiness>,
    query_result: Result<Query<WorkspaceQuery>, QueryRejection>,
) -> Result<Json<ListRolesResponse>, ApiError> {
    let services = readiness.services()?;
    let Query(params) = query_result.map_err(|err| ApiError::validation(err.body_text()))?;
    let (Some(location_id), Some(workspace_id)) =
        (present(params.location_id), present(params.workspace_id))
    else {
        return Err(ApiError::validation(
            "locationId and workspaceId are required",
        ));
    };
    let scope = WorkspaceScope::from_parts(location_id, workspace_id)
        .map_err(|err| ApiError::validation(err.to_string()))?;

    let assignments = services
        .roles()
        .list(&scope)
        .await
        .map_err(|err| service_error(LIST_ROUTE, err))?;
    Ok(Json(ListRolesResponse {
        ok: true,
        roles: assignments.iter().map(RoleRow::from).collect(),
    }))
}

pub(super) async fn assign(
    State(readiness): State<Readiness>,
    raw: Bytes,
) -> Result<Json<AssignRoleResponse>, ApiError> {
    let services = readiness.services()?;
    let body: AssignRoleBody =
        parse_body(&raw).ok_or_else(|| ApiError::validation("Invalid JSON body"))?;
    let (Some(location_id), Some(workspace_id), Some(user_email), Some(role)) = (
        present(body.location_id),
        present(body.workspace_id),
        present(body.user_email),
        present(body.role),
    ) else {
        return Err(ApiError::validation(
            "locationId, workspaceId, userEmail, and role are required",
        ));
    };

    let request = AssignRoleRequest::new(location_id, workspace_id, user_email, role);
    let assignment = services
        .roles()
        .assign(request)
        .await
        .map_err(|err| service_error(ASSIGN_ROUTE, err))?;
    Ok(Json(AssignRoleResponse {
        ok: true,
        role: RoleRow::from(&assignment),
    }))
}

pub(super) async fn remove(
    State(readiness): State<Readiness>,
    query_result: Result<Query<WorkspaceQuery>, QueryRejection>,
) -> Result<Json<RemoveRoleResponse>, ApiError> {
    let services = readiness.services()?;
    let Query(params) = query_result.map_err(|err| ApiError::validation(err.body_text()))?;
    let (Some(location_id), Some(workspace_id), Some(raw_email)) = (
        present(params.location_id),
        present(params.workspace_id),
        present(params.user_email),
    ) else {
        return Err(ApiError::validation(
            "locationId, workspaceId, and userEmail are required",
        ));
    };
    let scope = WorkspaceScope::from_parts(location_id, workspace_id)
        .map_err(|err| ApiError::validation(err.to_string()))?;
    let user_email =
        UserEmail::new(raw_email).map_err(|err| ApiError::validation(err.to_string()))?;

    let deleted = services
        .roles()
        .remove(&scope, &user_email)
        .await
        .map_err(|err| service_error(REMOVE_ROUTE, err))?;
    Ok(Json(RemoveRoleResponse { ok: true, deleted }))
}

fn service_error(route: &'static str, err: RoleServiceError) -> ApiError {
    match err {
        RoleServiceError::Domain(domain) => ApiError::validation(domain.to_string()),
        RoleServiceError::InvalidRole(_) => ApiError::validation("Invalid role"),
        RoleServiceError::NotFound { .. } => ApiError::NotFound("Role not found".to_owned()),
        RoleServiceError::Repository(repository) => ApiError::storage(route, &repository),
    }
}
