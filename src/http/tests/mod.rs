//! Unit tests for the HTTP error envelope and readiness gating.

use super::{
    ApiError, HEALTH_PATH, NOT_CONFIGURED, ROLES_PATH, Readiness, STATE_PATH, Services, router,
};
use crate::role::domain::RoleResolutionPolicy;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(readiness: Readiness, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    let response = router(readiness)
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, body)
}

async fn render(error: ApiError) -> (StatusCode, Value) {
    let response = axum::response::IntoResponse::into_response(error);
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    (status, serde_json::from_slice(&bytes).expect("body should be JSON"))
}

#[rstest]
#[case(ApiError::validation("bad"), StatusCode::BAD_REQUEST)]
#[case(ApiError::NotFound("gone".to_owned()), StatusCode::NOT_FOUND)]
#[case(ApiError::NotConfigured("x".to_owned()), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(ApiError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED)]
fn errors_map_to_statuses(#[case] error: ApiError, #[case] expected: StatusCode) {
    assert_eq!(error.status(), expected);
}

#[rstest]
#[tokio::test]
async fn validation_envelope_has_no_detail() {
    let (status, body) = render(ApiError::validation("Invalid role")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"ok": false, "error": "Invalid role"}));
}

#[rstest]
#[tokio::test]
async fn storage_envelope_names_route_and_detail() {
    let error = ApiError::storage("GET /api/workspace-roles", &"connection refused");
    let (status, body) = render(error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "ok": false,
            "error": "DB error (GET /api/workspace-roles)",
            "detail": "connection refused"
        })
    );
}

#[rstest]
#[case(Method::GET, "/api/workspace-roles?locationId=l&workspaceId=w")]
#[case(Method::POST, ROLES_PATH)]
#[case(Method::DELETE, ROLES_PATH)]
#[case(Method::PUT, ROLES_PATH)]
#[case(Method::GET, STATE_PATH)]
#[case(Method::POST, STATE_PATH)]
#[case(Method::PATCH, STATE_PATH)]
#[tokio::test]
async fn unconfigured_store_fails_every_request(#[case] method: Method, #[case] uri: &str) {
    let (status, body) = send(Readiness::unconfigured(), method, uri).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"ok": false, "error": NOT_CONFIGURED}));
}

#[rstest]
#[case(Method::PUT, ROLES_PATH)]
#[case(Method::PATCH, ROLES_PATH)]
#[case(Method::DELETE, STATE_PATH)]
#[case(Method::PUT, STATE_PATH)]
#[tokio::test]
async fn unsupported_methods_are_rejected(#[case] method: Method, #[case] uri: &str) {
    let readiness = Readiness::Ready(Services::in_memory(RoleResolutionPolicy::default()));
    let (status, body) = send(readiness, method, uri).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"ok": false, "error": "Method not allowed"}));
}

#[rstest]
#[tokio::test]
async fn health_reports_ready_store() {
    let readiness = Readiness::Ready(Services::in_memory(RoleResolutionPolicy::default()));
    let (status, body) = send(readiness, Method::GET, HEALTH_PATH).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "ready": true}));
}

#[rstest]
#[tokio::test]
async fn health_reports_unreachable_store() {
    let readiness = Readiness::NotConfigured("database is unreachable: refused".to_owned());
    let (status, body) = send(readiness, Method::GET, HEALTH_PATH).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body,
        json!({
            "ok": false,
            "ready": false,
            "error": "database is unreachable: refused"
        })
    );
}
