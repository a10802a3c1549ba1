//! Excel / OpenDocument workbook reader

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{BinjipError, Result};
use crate::formats::TableReader;
use crate::models::{CellValue, Table};

/// Workbook reader backed by calamine; only the first worksheet is read
pub struct ExcelReader;

impl TableReader for ExcelReader {
    fn read(&self, bytes: &[u8]) -> Result<Table> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
            BinjipError::SpreadsheetParse {
                format: self.format_name().to_string(),
                reason: e.to_string(),
            }
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(BinjipError::EmptyWorkbook)?
            .map_err(|e| BinjipError::SpreadsheetParse {
                format: self.format_name().to_string(),
                reason: e.to_string(),
            })?;

        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header_row) => header_row.iter().map(|cell| cell.to_string()).collect(),
            None => Vec::new(),
        };

        let rows = rows.map(|row| row.iter().map(cell_value).collect()).collect();

        Ok(Table::new(headers, rows))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["xlsx", "xlsm", "xlsb", "xls", "ods"]
    }

    fn format_name(&self) -> &str {
        "Excel"
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::from_text(s),
        other => CellValue::Text(other.to_string()),
    }
}
