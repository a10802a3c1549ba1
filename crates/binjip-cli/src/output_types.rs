use binjip_core::aggregate::DistrictAggregate;
use binjip_core::filter::FilterOptions;
use binjip_core::loader::LoadSummary;
use binjip_core::models::District;
use serde::Serialize;
use tabled::Tabled;

/// Output for render command
#[derive(Debug, Serialize)]
pub struct RenderOutput {
    pub output_path: Option<String>,
    pub summary: LoadSummary,
    pub filtered_rows: usize,
    pub districts: usize,
    pub bytes: usize,
    pub photos: usize,
}

/// Output for inspect command
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub file: String,
    pub summary: LoadSummary,
    pub options: FilterOptions,
    pub districts: Vec<DistrictAggregate>,
    pub bin_edges: Vec<f64>,
}

/// One row of the per-district count table
#[derive(Debug, Serialize, Tabled)]
pub struct DistrictCountRow {
    #[tabled(rename = "District")]
    pub district: String,
    #[tabled(rename = "Code")]
    pub code: String,
    #[tabled(rename = "Count")]
    pub count: usize,
    #[tabled(rename = "Bin")]
    pub bin: usize,
}

impl From<&DistrictAggregate> for DistrictCountRow {
    fn from(aggregate: &DistrictAggregate) -> Self {
        Self {
            district: aggregate.district.clone(),
            code: aggregate.code.clone(),
            count: aggregate.count,
            bin: aggregate.bin,
        }
    }
}

/// One row of the district code table
#[derive(Debug, Serialize, Tabled)]
pub struct DistrictRow {
    #[tabled(rename = "District")]
    pub name: &'static str,
    #[tabled(rename = "Code")]
    pub code: &'static str,
}

impl From<&District> for DistrictRow {
    fn from(district: &District) -> Self {
        Self {
            name: district.name,
            code: district.code,
        }
    }
}

/// One resolved configuration value
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
