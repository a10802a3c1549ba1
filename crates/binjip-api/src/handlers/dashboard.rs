use std::sync::Arc;

use askama::Template;
use axum::{extract::State, response::Html};
use binjip_core::models::ALL_DISTRICTS_LABEL;
use binjip_map::export::MAP_TITLE;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    title: &'a str,
    all_districts: &'a str,
    boundary_error: Option<&'a str>,
    max_upload_mb: usize,
}

/// GET / - upload page, or the boundary error when startup loading failed
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let page = DashboardTemplate {
        title: MAP_TITLE,
        all_districts: ALL_DISTRICTS_LABEL,
        boundary_error: state.boundary_error(),
        max_upload_mb: state.max_upload_bytes / (1024 * 1024),
    }
    .render()
    .map_err(|e| ApiError::internal("Failed to render dashboard").with_details(e.to_string()))?;

    Ok(Html(page))
}
