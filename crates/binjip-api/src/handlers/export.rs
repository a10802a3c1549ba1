use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use binjip_map::pipeline::NO_DATA_MESSAGE;

use crate::error::ApiError;
use crate::services::{extract_form, RenderService};
use crate::state::AppState;

/// Render the upload and return the map document as a download
pub async fn handle_export(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    state.pipeline()?;

    let upload = extract_form(&mut multipart).await?.into_upload()?;
    let (request_id, outcome) = RenderService::run(&state, &upload)?;

    let artifact = outcome
        .artifact()
        .ok_or_else(|| ApiError::unprocessable(NO_DATA_MESSAGE))?;

    tracing::info!(request_id = %request_id, bytes = artifact.len(), "Exporting map document");

    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, artifact.mime.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes().to_vec(),
    )
        .into_response())
}
