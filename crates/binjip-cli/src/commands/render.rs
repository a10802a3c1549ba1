//! Render command implementation

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::cli::RenderArgs;
use crate::output::OutputWriter;
use crate::output_types::RenderOutput;
use anyhow::{Context, Result};
use binjip_core::config::CliConfigOverrides;
use binjip_core::filter::FilterSelection;
use binjip_core::photos::PhotoStore;
use binjip_map::pipeline::NO_DATA_MESSAGE;
use binjip_map::{BoundaryDataset, RenderPipeline, Upload};

pub async fn execute(args: RenderArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let config = super::load_config(
        config_path,
        CliConfigOverrides {
            boundary_path: args.boundary.clone(),
            tile_api_key: args.vworld_key.clone(),
            initial_zoom: args.zoom,
        },
    )?;
    let settings = config.settings();

    let bytes = fs::read(&args.spreadsheet)
        .with_context(|| format!("Failed to read spreadsheet {}", args.spreadsheet.display()))?;

    let photos = match &args.photos {
        Some(dir) => {
            let photos = PhotoStore::from_dir(dir)?;
            output.info(format!("Loaded {} photo(s) from {}", photos.len(), dir.display()));
            photos
        }
        None => PhotoStore::new(),
    };

    let boundary = BoundaryDataset::from_settings(&settings)
        .await
        .context("District boundaries are required to draw the map")?;

    let upload = Upload {
        file_name: args.spreadsheet.display().to_string(),
        bytes,
        photos,
        selection: FilterSelection::from_raw(&args.districts, &args.housing_types),
    };

    let pipeline = RenderPipeline::new(Arc::new(boundary), settings);
    let outcome = pipeline.execute(&upload)?;

    if outcome.summary.dropped_rows > 0 {
        output.warning(format!(
            "Dropped {} row(s) without numeric coordinates",
            outcome.summary.dropped_rows
        ));
    }

    let Some(artifact) = outcome.artifact() else {
        output.warning(NO_DATA_MESSAGE);
        if output.is_json() {
            return output.result(RenderOutput {
                output_path: None,
                summary: outcome.summary,
                filtered_rows: 0,
                districts: 0,
                bytes: 0,
                photos: upload.photos.len(),
            });
        }
        return Ok(());
    };

    fs::write(&args.output, artifact.bytes())
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let districts = outcome.aggregation().map(|a| a.districts.len()).unwrap_or_default();
    if output.is_json() {
        output.result(RenderOutput {
            output_path: Some(args.output.display().to_string()),
            summary: outcome.summary.clone(),
            filtered_rows: outcome.filtered_rows,
            districts,
            bytes: artifact.len(),
            photos: upload.photos.len(),
        })
    } else {
        output.success(format!(
            "Wrote {} ({} buildings in {} districts)",
            args.output.display(),
            outcome.filtered_rows,
            districts
        ));
        Ok(())
    }
}
