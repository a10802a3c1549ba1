//! Config command implementation

use std::path::Path;

use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;
use binjip_core::config::CliConfigOverrides;

pub fn execute(config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let config = super::load_config(config_path, CliConfigOverrides::default())?;

    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow {
            key,
            value,
            source: format!("{:?}", source),
        })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    output.section("Map Settings");
    output.table(rows)
}
