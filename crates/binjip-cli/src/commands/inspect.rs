//! Inspect command implementation

use std::fs;

use crate::cli::InspectArgs;
use crate::output::OutputWriter;
use crate::output_types::{DistrictCountRow, InspectOutput};
use anyhow::{Context, Result};
use binjip_core::aggregate::aggregate;
use binjip_core::loader::load_upload;

pub fn execute(args: InspectArgs, output: &OutputWriter) -> Result<()> {
    let file_name = args.spreadsheet.display().to_string();
    let bytes = fs::read(&args.spreadsheet)
        .with_context(|| format!("Failed to read spreadsheet {}", file_name))?;

    let report = load_upload(&file_name, &bytes)?;
    let aggregation = aggregate(&report.records)?;
    let summary = report.summary();

    if output.is_json() {
        return output.result(InspectOutput {
            file: file_name,
            summary,
            options: report.filter_options(),
            districts: aggregation.districts,
            bin_edges: aggregation.binning.edges,
        });
    }

    output.section(format!("Load Report: {}", file_name));
    output.kv("Rows", summary.total_rows);
    output.kv("Retained", summary.retained_rows);
    output.kv("Dropped", summary.dropped_rows);
    if !summary.dropped_row_numbers.is_empty() {
        let rows: Vec<String> = summary.dropped_row_numbers.iter().map(|n| n.to_string()).collect();
        output.warning(format!(
            "Rows without numeric coordinates: {}",
            rows.join(", ")
        ));
    }

    output.section("District Counts");
    output.table(aggregation.districts.iter().map(DistrictCountRow::from).collect())?;

    let options = report.filter_options();
    output.section("Filter Options");
    output.kv("Districts", options.districts.join(", "));
    output.kv("Housing types", options.housing_types.join(", "));

    Ok(())
}
