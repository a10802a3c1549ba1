//! Districts command implementation

use crate::output::OutputWriter;
use crate::output_types::DistrictRow;
use anyhow::Result;
use binjip_core::models::DISTRICTS;

pub fn execute(output: &OutputWriter) -> Result<()> {
    output.section("Busan Districts");
    output.table(DISTRICTS.iter().map(DistrictRow::from).collect())
}
