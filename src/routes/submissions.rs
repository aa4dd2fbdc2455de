use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub name: Option<String>,
    pub text: Option<String>,
}

const MISSING_FIELDS: &str = "Missing required fields: name and text";

pub async fn submit(
    State(state): State<SharedState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let body = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge("Request body too large".to_string())
        } else {
            AppError::Validation(e.body_text())
        }
    })?;

    let req: SubmitRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))?;

    let (Some(name), Some(text)) = (req.name, req.text) else {
        return Err(AppError::Validation(MISSING_FIELDS.to_string()));
    };

    let submission = state.submissions.create(name, text)?;
    tracing::info!(id = submission.id, "Submission stored");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Text submitted successfully",
            "submission": submission,
        })),
    ))
}

pub async fn list(
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let submissions = state.submissions.list()?;

    Ok(Json(json!({
        "success": true,
        "count": submissions.len(),
        "submissions": submissions,
    })))
}

pub async fn get(
    State(state): State<SharedState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let not_found = || AppError::NotFound("Submission not found".to_string());

    // Non-numeric ids can never match a stored submission.
    let Ok(Path(id)) = id else {
        return Err(not_found());
    };

    let submission = state.submissions.find_by_id(id)?.ok_or_else(not_found)?;

    Ok(Json(json!({
        "success": true,
        "submission": submission,
    })))
}
