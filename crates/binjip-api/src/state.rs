use std::sync::Arc;

use binjip_core::config::MapSettings;
use binjip_map::{BoundaryDataset, RenderPipeline};

use crate::error::ApiError;

/// Boundary dataset as loaded at startup
#[derive(Debug, Clone)]
pub enum BoundaryStatus {
    Loaded(RenderPipeline),
    /// Startup fetch failed; the server answers with this reason until restarted
    Failed { reason: String },
}

/// Shared, immutable server state
#[derive(Debug, Clone)]
pub struct AppState {
    pub boundary: BoundaryStatus,
    pub settings: MapSettings,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn loaded(boundary: BoundaryDataset, settings: MapSettings, max_upload_bytes: usize) -> Self {
        let pipeline = RenderPipeline::new(Arc::new(boundary), settings.clone());
        Self {
            boundary: BoundaryStatus::Loaded(pipeline),
            settings,
            max_upload_bytes,
        }
    }

    pub fn failed(reason: impl Into<String>, settings: MapSettings, max_upload_bytes: usize) -> Self {
        Self {
            boundary: BoundaryStatus::Failed { reason: reason.into() },
            settings,
            max_upload_bytes,
        }
    }

    /// The render pipeline, or `503` when the boundary dataset is unavailable
    pub fn pipeline(&self) -> Result<&RenderPipeline, ApiError> {
        match &self.boundary {
            BoundaryStatus::Loaded(pipeline) => Ok(pipeline),
            BoundaryStatus::Failed { reason } => {
                Err(ApiError::unavailable("GeoJSON 파일을 불러오는 데 오류가 발생했습니다.")
                    .with_details(reason.clone()))
            }
        }
    }

    pub fn boundary_error(&self) -> Option<&str> {
        match &self.boundary {
            BoundaryStatus::Loaded(_) => None,
            BoundaryStatus::Failed { reason } => Some(reason),
        }
    }
}
