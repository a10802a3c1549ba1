//! Format abstraction layer for tabular uploads
//!
//! Each spreadsheet format implements the `TableReader` trait, and the
//! `TableFormatRegistry` dispatches an upload to the reader that claims its
//! file extension.

use std::path::Path;

use crate::error::{BinjipError, Result};
use crate::models::Table;

pub mod delimited;
pub mod excel;

pub use delimited::CsvReader;
pub use excel::ExcelReader;

/// Reader trait that all tabular format implementations must implement
pub trait TableReader: Send + Sync {
    /// Read the first sheet of an upload into a table.
    ///
    /// The first row is taken as the header row.
    fn read(&self, bytes: &[u8]) -> Result<Table>;

    /// Get supported file extensions (e.g., ["xlsx", "xls"])
    fn supported_extensions(&self) -> &[&str];

    /// Get human-readable format name (e.g., "Excel", "CSV")
    fn format_name(&self) -> &str;
}

/// Central registry for table readers
pub struct TableFormatRegistry {
    readers: Vec<Box<dyn TableReader>>,
}

impl TableFormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { readers: Vec::new() }
    }

    /// Register a table reader
    pub fn register(&mut self, reader: Box<dyn TableReader>) {
        self.readers.push(reader);
    }

    /// Detect format from a file name and return the matching reader
    pub fn detect_format(&self, file_name: &str) -> Result<&dyn TableReader> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| BinjipError::UnsupportedFormat {
                extension: "none".to_string(),
                supported: self.supported_formats(),
            })?;

        self.readers
            .iter()
            .find(|r| r.supported_extensions().contains(&extension.as_str()))
            .map(|r| r.as_ref())
            .ok_or_else(|| BinjipError::UnsupportedFormat {
                extension,
                supported: self.supported_formats(),
            })
    }

    /// Read an upload, dispatching on its file name
    pub fn read(&self, file_name: &str, bytes: &[u8]) -> Result<Table> {
        let reader = self.detect_format(file_name)?;
        tracing::debug!(
            file_name = %file_name,
            format = reader.format_name(),
            size = bytes.len(),
            "Reading spreadsheet"
        );
        reader.read(bytes)
    }

    /// Get list of all supported extensions
    pub fn supported_formats(&self) -> Vec<String> {
        self.readers
            .iter()
            .flat_map(|r| r.supported_extensions())
            .map(|s| s.to_string())
            .collect()
    }

    pub fn readers(&self) -> &[Box<dyn TableReader>] {
        &self.readers
    }
}

impl Default for TableFormatRegistry {
    /// Registry with the Excel and CSV readers
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ExcelReader));
        registry.register(Box::new(CsvReader));
        registry
    }
}
