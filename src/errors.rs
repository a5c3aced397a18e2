use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::services::workshop::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Upstream(#[from] ApiError),

    #[error("employee id is required for status transitions")]
    MissingEmployee,

    #[error("cannot move appointment from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("unknown status: {0}")]
    UnknownStatus(String),

    #[error("unknown appointment type: {0}")]
    UnknownKind(String),

    #[error("unauthorized")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Upstream(ApiError::MissingEmployee) => StatusCode::BAD_REQUEST,
            AppError::Upstream(ApiError::Status { status: 404, .. }) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::MissingEmployee => StatusCode::BAD_REQUEST,
            AppError::InvalidTransition { .. } => StatusCode::CONFLICT,
            AppError::UnknownStatus(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownKind(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
