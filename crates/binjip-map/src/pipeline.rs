//! End-to-end render pipeline
//!
//! Load → filter → aggregate → render → export, run from scratch for every
//! upload. Only the boundary dataset and the settings are shared between runs.

use std::sync::Arc;

use binjip_core::aggregate::{aggregate, Aggregation};
use binjip_core::config::MapSettings;
use binjip_core::error::Result;
use binjip_core::filter::{apply_filter, FilterOptions, FilterSelection};
use binjip_core::loader::{load_upload, LoadReport, LoadSummary};
use binjip_core::photos::PhotoStore;

use crate::boundary::BoundaryDataset;
use crate::export::ExportArtifact;
use crate::render::MapRenderer;

/// Shown instead of a map when the filters match nothing
pub const NO_DATA_MESSAGE: &str = "선택한 조건에 대한 정보가 없습니다.";

/// Everything one render needs from the user
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub photos: PhotoStore,
    pub selection: FilterSelection,
}

#[derive(Debug, Clone)]
pub enum RenderOutcome {
    Rendered {
        aggregation: Aggregation,
        artifact: ExportArtifact,
    },
    /// No records survived loading and filtering
    Empty,
}

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub summary: LoadSummary,
    pub options: FilterOptions,
    pub filtered_rows: usize,
    pub result: RenderOutcome,
}

impl PipelineOutcome {
    pub fn artifact(&self) -> Option<&ExportArtifact> {
        match &self.result {
            RenderOutcome::Rendered { artifact, .. } => Some(artifact),
            RenderOutcome::Empty => None,
        }
    }

    pub fn aggregation(&self) -> Option<&Aggregation> {
        match &self.result {
            RenderOutcome::Rendered { aggregation, .. } => Some(aggregation),
            RenderOutcome::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.result, RenderOutcome::Empty)
    }
}

/// Shared, read-only inputs of every render
#[derive(Debug, Clone)]
pub struct RenderPipeline {
    boundary: Arc<BoundaryDataset>,
    settings: MapSettings,
}

impl RenderPipeline {
    pub fn new(boundary: Arc<BoundaryDataset>, settings: MapSettings) -> Self {
        Self { boundary, settings }
    }

    pub fn boundary(&self) -> &BoundaryDataset {
        &self.boundary
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Run the whole pipeline on an uploaded spreadsheet
    pub fn execute(&self, upload: &Upload) -> Result<PipelineOutcome> {
        let report = load_upload(&upload.file_name, &upload.bytes)?;
        self.execute_report(&report, &upload.photos, &upload.selection)
    }

    /// Run filter, aggregate, render and export on already loaded records
    pub fn execute_report(
        &self,
        report: &LoadReport,
        photos: &PhotoStore,
        selection: &FilterSelection,
    ) -> Result<PipelineOutcome> {
        let filtered = apply_filter(&report.records, selection);

        let result = if filtered.is_empty() {
            tracing::info!(retained = report.records.len(), "No records match the selection");
            RenderOutcome::Empty
        } else {
            let aggregation = aggregate(&filtered)?;
            let map = MapRenderer::new(&self.settings, &self.boundary).render(
                &filtered,
                &aggregation,
                photos,
            )?;
            let artifact = ExportArtifact::from_map(&map)?;
            RenderOutcome::Rendered {
                aggregation,
                artifact,
            }
        };

        Ok(PipelineOutcome {
            summary: report.summary(),
            options: report.filter_options(),
            filtered_rows: filtered.len(),
            result,
        })
    }
}
