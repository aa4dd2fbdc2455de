pub mod auth;
pub mod config;
pub mod error;
pub mod hub;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod views;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::hub::InsightsHubClient;
use crate::state::{AppState, SharedState};
use crate::store::SubmissionStore;

pub fn build_app(config: Config) -> Result<Router, String> {
    let hub = InsightsHubClient::new(config.insights_hub_url.clone(), config.upstream_timeout)?;
    tracing::info!(
        url = hub.base_url(),
        timeout_secs = config.upstream_timeout.as_secs(),
        "Insights Hub client configured"
    );

    let state: SharedState = Arc::new(AppState {
        config,
        submissions: SubmissionStore::new(),
        hub,
    });

    // Every route is reachable from the root and, if configured, under the base path.
    let mut router = routes::app_routes();
    let base_path = state.config.base_path.clone();
    if !base_path.is_empty() {
        tracing::info!(%base_path, "Mounting routes under base path");
        router = router
            .nest(&base_path, routes::app_routes())
            .route(&format!("{base_path}/"), get(views::index::index));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    // Oversized bodies surface as extractor rejections, so handlers can answer in JSON.
    let body_limit = DefaultBodyLimit::max(state.config.max_body_size);

    Ok(router.layer(body_limit).layer(layers).with_state(state))
}
