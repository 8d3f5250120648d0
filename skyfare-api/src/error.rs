use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skyfare_core::{FailureKind, ServiceFailure};

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError { message: String, kind: FailureKind },
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": msg })),
            AppError::NotFoundError { message, kind } => {
                (StatusCode::NOT_FOUND, json!({ "error": message, "kind": kind }))
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal Server Error" }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

/// Every service failure is a soft "not found"; `kind` tells callers which one.
impl From<ServiceFailure> for AppError {
    fn from(failure: ServiceFailure) -> Self {
        AppError::NotFoundError {
            message: failure.message,
            kind: failure.kind,
        }
    }
}
