//! CSV reader

use crate::error::{BinjipError, Result};
use crate::formats::TableReader;
use crate::models::{CellValue, Table};

/// Comma-separated reader; the first record is the header row
pub struct CsvReader;

impl TableReader for CsvReader {
    fn read(&self, bytes: &[u8]) -> Result<Table> {
        let mut reader = ::csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| self.parse_error(e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.parse_error(e))?;
            rows.push(record.iter().map(CellValue::from_text).collect());
        }

        Ok(Table::new(headers, rows))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["csv"]
    }

    fn format_name(&self) -> &str {
        "CSV"
    }
}

impl CsvReader {
    fn parse_error(&self, err: ::csv::Error) -> BinjipError {
        BinjipError::SpreadsheetParse {
            format: self.format_name().to_string(),
            reason: err.to_string(),
        }
    }
}
