use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::extractor::PassThroughToken;
use crate::error::AppError;
use crate::hub::{metrics, ASSETS_PATH};
use crate::models::DashboardMetrics;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct AssetParams {
    pub size: Option<u32>,
    pub page: Option<u32>,
    pub filter: Option<String>,
}

pub async fn assets(
    token: PassThroughToken,
    State(state): State<SharedState>,
    params: Result<Query<AssetParams>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;

    let mut query = vec![
        ("size", params.size.unwrap_or(10).to_string()),
        ("page", params.page.unwrap_or(0).to_string()),
    ];
    if let Some(filter) = params.filter {
        query.push(("filter", filter));
    }

    let data = state
        .hub
        .get_json_any_success(ASSETS_PATH, &query, token.as_str())
        .await?;

    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn dashboard_metrics(
    token: PassThroughToken,
    State(state): State<SharedState>,
) -> Json<DashboardMetrics> {
    Json(metrics::collect(&state.hub, token.as_str()).await)
}
