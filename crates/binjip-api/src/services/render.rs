use axum::extract::Multipart;
use binjip_map::{PipelineOutcome, Upload};
use uuid::Uuid;

use crate::dto::RenderForm;
use crate::error::ApiError;
use crate::state::AppState;

/// Read the render form fields from a multipart body.
///
/// File parts submitted without a file name (empty file inputs) are skipped;
/// unknown fields are ignored.
pub async fn extract_form(multipart: &mut Multipart) -> Result<RenderForm, ApiError> {
    let mut form = RenderForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bad_request("Failed to parse multipart form").with_details(e.to_string())
    })? {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().unwrap_or("").to_string();

        match name.as_str() {
            "spreadsheet" | "photos" => {
                let data = field.bytes().await.map_err(|e| {
                    ApiError::bad_request("Failed to read file data").with_details(e.to_string())
                })?;
                if file_name.is_empty() {
                    continue;
                }
                if name == "spreadsheet" {
                    form.spreadsheet = Some((file_name, data.to_vec()));
                } else {
                    form.photos.push((file_name, data.to_vec()));
                }
            }
            "district" | "housing_type" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::bad_request("Failed to read form value").with_details(e.to_string())
                })?;
                if name == "district" {
                    form.districts.push(value);
                } else {
                    form.housing_types.push(value);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Service running one upload through the render pipeline
pub struct RenderService;

impl RenderService {
    /// Run the pipeline inside a span tagged with a fresh request id
    pub fn run(state: &AppState, upload: &Upload) -> Result<(String, PipelineOutcome), ApiError> {
        let pipeline = state.pipeline()?;
        let request_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!("render", request_id = %request_id);

        span.in_scope(|| {
            tracing::info!(
                file_name = %upload.file_name,
                size = upload.bytes.len(),
                photos = upload.photos.len(),
                districts = upload.selection.districts.len(),
                housing_types = upload.selection.housing_types.len(),
                "Rendering upload"
            );

            let outcome = pipeline.execute(upload).map_err(|e| {
                tracing::warn!(error = %e, "Render failed");
                ApiError::from(e)
            })?;

            tracing::info!(
                retained = outcome.summary.retained_rows,
                dropped = outcome.summary.dropped_rows,
                filtered = outcome.filtered_rows,
                empty = outcome.is_empty(),
                "Render finished"
            );

            Ok((request_id.clone(), outcome))
        })
    }
}
