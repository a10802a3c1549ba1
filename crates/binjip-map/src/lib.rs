//! Binjip Map - Boundary data, map rendering, and HTML export
//!
//! This crate turns filtered building records into a self-contained Leaflet
//! document: district boundaries, a choropleth of per-district counts, and
//! one marker cluster per district with photo popups.

pub mod boundary;
pub mod export;
pub mod palette;
pub mod pipeline;
pub mod popup;
pub mod render;

pub use boundary::BoundaryDataset;
pub use export::ExportArtifact;
pub use pipeline::{PipelineOutcome, RenderPipeline, Upload};
pub use render::{MapRenderer, RenderedMap};
