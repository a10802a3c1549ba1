use binjip_core::aggregate::DistrictAggregate;
use binjip_core::filter::FilterOptions;
use binjip_core::loader::LoadSummary;
use binjip_map::pipeline::{PipelineOutcome, RenderOutcome, NO_DATA_MESSAGE};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "binjip-api" }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStatus {
    Rendered,
    Empty,
}

/// Selector values; districts lead with the "all districts" sentinel
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub districts: Vec<String>,
    pub housing_types: Vec<String>,
}

impl From<&FilterOptions> for OptionsResponse {
    fn from(options: &FilterOptions) -> Self {
        Self {
            districts: options.district_choices(),
            housing_types: options.housing_types.clone(),
        }
    }
}

/// Render response
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub request_id: String,
    pub status: RenderStatus,
    pub summary: LoadSummary,
    pub options: OptionsResponse,
    pub filtered_rows: usize,
    pub aggregates: Vec<DistrictAggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_html: Option<String>,
}

impl RenderResponse {
    pub fn from_outcome(request_id: String, outcome: PipelineOutcome) -> Self {
        let options = OptionsResponse::from(&outcome.options);
        let (status, aggregates, message, file_name, map_html) = match outcome.result {
            RenderOutcome::Rendered { aggregation, artifact } => (
                RenderStatus::Rendered,
                aggregation.districts,
                None,
                Some(artifact.file_name),
                Some(artifact.into_html()),
            ),
            RenderOutcome::Empty => {
                (RenderStatus::Empty, Vec::new(), Some(NO_DATA_MESSAGE), None, None)
            }
        };

        Self {
            request_id,
            status,
            summary: outcome.summary,
            options,
            filtered_rows: outcome.filtered_rows,
            aggregates,
            message,
            file_name,
            map_html,
        }
    }
}
