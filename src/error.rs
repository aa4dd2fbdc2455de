use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::hub::HubError;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    PayloadTooLarge(String),
    NotFound(String),
    Unauthorized(String),
    Upstream { status: StatusCode, details: String },
    Timeout(String),
    Transport(String),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {msg}"),
            AppError::PayloadTooLarge(msg) => write!(f, "Payload Too Large: {msg}"),
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AppError::Upstream { status, details } => {
                write!(f, "Upstream Error: HTTP {status}: {details}")
            }
            AppError::Timeout(msg) => write!(f, "Timeout: {msg}"),
            AppError::Transport(msg) => write!(f, "Transport Error: {msg}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::Upstream { status, details } => {
                tracing::warn!(%status, "Insights Hub returned an error");
                (
                    status,
                    format!("Insights Hub API error: {status}"),
                    Some(details),
                )
            }
            AppError::Timeout(msg) => {
                tracing::warn!("Upstream timeout: {msg}");
                (StatusCode::GATEWAY_TIMEOUT, msg, None)
            }
            AppError::Transport(msg) => {
                tracing::error!("Upstream transport error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to reach Insights Hub API".to_string(),
                    Some(msg),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({ "success": false, "error": message });
        if let Some(details) = details {
            body["details"] = json!(details);
        }
        (status, axum::Json(body)).into_response()
    }
}

impl From<HubError> for AppError {
    fn from(err: HubError) -> Self {
        match err {
            HubError::Status { status, body } => AppError::Upstream {
                status,
                details: body,
            },
            err @ HubError::Timeout(_) => AppError::Timeout(err.to_string()),
            HubError::Transport(msg) => AppError::Transport(msg),
            err @ HubError::Decode(_) => AppError::Upstream {
                status: StatusCode::BAD_GATEWAY,
                details: err.to_string(),
            },
        }
    }
}
