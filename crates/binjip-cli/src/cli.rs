use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Binjip - Busan vacant building map
#[derive(Parser, Debug)]
#[command(name = "binjip")]
#[command(about = "Render vacant building spreadsheets as clustered district maps", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a spreadsheet to a standalone HTML map
    Render(RenderArgs),

    /// Show the load report and per-district counts of a spreadsheet
    Inspect(InspectArgs),

    /// List the district code table
    Districts,

    /// Show the resolved map settings and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Spreadsheet with building records (xlsx, xls, ods, csv)
    pub spreadsheet: PathBuf,

    /// Directory of photos referenced by the "사진 경로" column
    #[arg(long, value_name = "DIR")]
    pub photos: Option<PathBuf>,

    /// District to include ("부산시 전체" for all); repeatable
    #[arg(long = "district", value_name = "NAME")]
    pub districts: Vec<String>,

    /// Housing type to include; repeatable
    #[arg(long = "housing-type", value_name = "NAME")]
    pub housing_types: Vec<String>,

    /// Output file
    #[arg(long, short = 'o', default_value = "map.html")]
    pub output: PathBuf,

    /// Local boundary GeoJSON instead of downloading it
    #[arg(long, value_name = "FILE")]
    pub boundary: Option<PathBuf>,

    /// vworld API key for the overlay tiles
    #[arg(long, value_name = "KEY")]
    pub vworld_key: Option<String>,

    /// Initial zoom level
    #[arg(long)]
    pub zoom: Option<u8>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Spreadsheet with building records (xlsx, xls, ods, csv)
    pub spreadsheet: PathBuf,
}
