use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::error::AppError;
use crate::state::SharedState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    base_path: String,
}

pub async fn index(State(state): State<SharedState>) -> Result<impl IntoResponse, AppError> {
    let template = IndexTemplate {
        base_path: state.config.base_path.clone(),
    };
    let html = template
        .render()
        .map_err(|e| AppError::Internal(format!("Failed to render index page: {e}")))?;
    Ok(Html(html))
}
