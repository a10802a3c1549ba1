use std::sync::Arc;

use axum::{extract::Multipart, extract::State, Json};

use crate::dto::RenderResponse;
use crate::error::ApiError;
use crate::services::{extract_form, RenderService};
use crate::state::AppState;

pub async fn handle_render(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<RenderResponse>, ApiError> {
    state.pipeline()?;

    let upload = extract_form(&mut multipart).await?.into_upload()?;
    let (request_id, outcome) = RenderService::run(&state, &upload)?;

    Ok(Json(RenderResponse::from_outcome(request_id, outcome)))
}
