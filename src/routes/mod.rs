pub mod health;
pub mod insights_hub;
pub mod submissions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;
use crate::views;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Submissions
        .route("/api/submit", post(submissions::submit))
        .route("/api/submissions", get(submissions::list))
        .route("/api/submissions/{id}", get(submissions::get))
        // Insights Hub
        .route("/api/insights-hub/assets", get(insights_hub::assets))
        .route(
            "/api/insights-hub/dashboard-metrics",
            get(insights_hub::dashboard_metrics),
        )
        .route("/api/health", get(health::health))
}

/// Everything the service exposes, relative to its mount point.
pub fn app_routes() -> Router<SharedState> {
    Router::new()
        .merge(api_routes())
        .merge(views::view_routes())
}
