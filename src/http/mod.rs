//! HTTP surface: the workspace roles and workspace state endpoints.
//!
//! Each endpoint is a single path whose handlers are selected by method.
//! Every failure is answered with the envelope `{ok:false, error, detail?}`.

mod error;
mod request;
mod roles;
mod workspace_state;

pub use error::ApiError;

use crate::db::PgPool;
use crate::role::{
    adapters::{memory::InMemoryRoleRepository, postgres::PostgresRoleRepository},
    domain::RoleResolutionPolicy,
    ports::RoleRepository,
    services::RoleService,
};
use crate::state::{
    adapters::{memory::InMemoryStateRepository, postgres::PostgresStateRepository},
    ports::StateRepository,
    services::StateService,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use mockable::DefaultClock;
use serde::Serialize;
use std::sync::Arc;

/// Path of the role management endpoint.
pub const ROLES_PATH: &str = "/api/workspace-roles";
/// Path of the workspace state endpoint.
pub const STATE_PATH: &str = "/api/workspace-state";
/// Path of the readiness probe.
pub const HEALTH_PATH: &str = "/healthz";

/// Message returned when no database has been configured.
pub const NOT_CONFIGURED: &str = "DATABASE_URL is not configured on the server";

/// Role service over a type-erased repository.
pub type DynRoleService = RoleService<dyn RoleRepository, DefaultClock>;
/// State service over a type-erased repository.
pub type DynStateService = StateService<dyn StateRepository, DefaultClock>;

/// Services backing the request handlers.
#[derive(Clone)]
pub struct Services {
    roles: DynRoleService,
    states: DynStateService,
}

impl Services {
    /// Creates services over the given repositories.
    #[must_use]
    pub fn new(
        roles: Arc<dyn RoleRepository>,
        states: Arc<dyn StateRepository>,
        policy: RoleResolutionPolicy,
    ) -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            roles: RoleService::with_policy(roles, Arc::clone(&clock), policy),
            states: StateService::new(states, clock),
        }
    }

    /// Creates services backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(pool: &PgPool, policy: RoleResolutionPolicy) -> Self {
        Self::new(
            Arc::new(PostgresRoleRepository::new(pool.clone())),
            Arc::new(PostgresStateRepository::new(pool.clone())),
            policy,
        )
    }

    /// Creates services backed by empty in-memory repositories.
    #[must_use]
    pub fn in_memory(policy: RoleResolutionPolicy) -> Self {
        Self::new(
            Arc::new(InMemoryRoleRepository::new()),
            Arc::new(InMemoryStateRepository::new()),
            policy,
        )
    }

    /// Returns the role service.
    #[must_use]
    pub const fn roles(&self) -> &DynRoleService {
        &self.roles
    }

    /// Returns the state service.
    #[must_use]
    pub const fn states(&self) -> &DynStateService {
        &self.states
    }
}

/// Whether the process could reach its database, decided once at startup.
#[derive(Clone)]
pub enum Readiness {
    /// The store is configured; requests are served.
    Ready(Services),
    /// The store is absent or unreachable; every request fails with the
    /// given reason.
    NotConfigured(String),
}

impl Readiness {
    /// Readiness for a process started without a database URL.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::NotConfigured(NOT_CONFIGURED.to_owned())
    }

    /// Returns the services, or the configuration error to answer with.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotConfigured`] when the store is not ready.
    pub fn services(&self) -> Result<&Services, ApiError> {
        match self {
            Self::Ready(services) => Ok(services),
            Self::NotConfigured(reason) => Err(ApiError::NotConfigured(reason.clone())),
        }
    }
}

/// Builds the application router.
#[must_use]
pub fn router(readiness: Readiness) -> Router {
    Router::new()
        .route(
            ROLES_PATH,
            get(roles::list)
                .post(roles::assign)
                .delete(roles::remove)
                .fallback(method_not_allowed),
        )
        .route(
            STATE_PATH,
            get(workspace_state::read)
                .post(workspace_state::write)
                .fallback(method_not_allowed),
        )
        .route(HEALTH_PATH, get(health))
        .with_state(readiness)
}

async fn method_not_allowed(State(readiness): State<Readiness>) -> ApiError {
    match readiness.services() {
        Ok(_) => ApiError::MethodNotAllowed,
        Err(err) => err,
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
    ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn health(State(readiness): State<Readiness>) -> Response {
    match readiness {
        Readiness::Ready(_) => (
            StatusCode::OK,
            Json(HealthResponse {
                ok: true,
                ready: true,
                error: None,
            }),
        )
            .into_response(),
        Readiness::NotConfigured(reason) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                ok: false,
                ready: false,
                error: Some(reason),
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests;
