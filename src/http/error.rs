//! Error envelope returned by every endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Request failure, rendered as `{ok:false, error, detail?}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The store is unconfigured or unreachable (500).
    NotConfigured(String),
    /// Missing or malformed input (400).
    Validation(String),
    /// The addressed row does not exist (404).
    NotFound(String),
    /// The store failed (500). `route` names the failing operation.
    Storage {
        /// Method and path of the failing request.
        route: &'static str,
        /// Diagnostic message from the store.
        detail: String,
    },
    /// The endpoint does not support the method (405).
    MethodNotAllowed,
}

impl ApiError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a storage error and logs it.
    #[must_use]
    pub fn storage(route: &'static str, err: &dyn fmt::Display) -> Self {
        tracing::error!(route, error = %err, "storage failure");
        Self::Storage {
            route,
            detail: err.to_string(),
        }
    }

    /// Returns the HTTP status of the error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotConfigured(_) | Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, detail) = match self {
            Self::NotConfigured(message) | Self::Validation(message) | Self::NotFound(message) => {
                (message, None)
            }
            Self::Storage { route, detail } => (format!("DB error ({route})"), Some(detail)),
            Self::MethodNotAllowed => ("Method not allowed".to_owned(), None),
        };
        (
            status,
            Json(ErrorBody {
                ok: false,
                error,
                detail,
            }),
        )
            .into_response()
    }
}
