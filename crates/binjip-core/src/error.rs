//! Error types for Binjip

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BinjipError {
    // Input errors
    #[error("Spreadsheet is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Unsupported spreadsheet format: .{extension} (supported: {})", supported.join(", "))]
    UnsupportedFormat {
        extension: String,
        supported: Vec<String>,
    },

    #[error("Failed to read {format} spreadsheet: {reason}")]
    SpreadsheetParse { format: String, reason: String },

    #[error("Spreadsheet contains no worksheet")]
    EmptyWorkbook,

    // Aggregation errors
    #[error("District '{name}' has no administrative code")]
    UnknownDistrict { name: String },

    // Boundary dataset errors
    #[error("Failed to load district boundaries from {url}: {reason}")]
    BoundaryFetch { url: String, reason: String },

    #[error("Invalid district boundary dataset: {reason}")]
    BoundaryInvalid { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error at {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Output errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Template rendering failed: {0}")]
    Template(String),
}

pub type Result<T> = std::result::Result<T, BinjipError>;
