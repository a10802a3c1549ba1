//! Input loader: schema validation and coordinate coercion
//!
//! Turns an uploaded table into `Record`s. Missing required columns fail the
//! whole upload; rows whose latitude or longitude cannot be coerced to a
//! number are dropped and counted in the `LoadReport`.

use serde::Serialize;

use crate::error::{BinjipError, Result};
use crate::filter::FilterOptions;
use crate::formats::TableFormatRegistry;
use crate::models::{CellValue, Record, Table};

pub const ADDRESS_COLUMN: &str = "주소명";
pub const LATITUDE_COLUMN: &str = "위도";
pub const LONGITUDE_COLUMN: &str = "경도";
pub const HOUSING_TYPE_COLUMN: &str = "주택유형";
pub const AREA_COLUMN: &str = "면적";
pub const DISTRICT_COLUMN: &str = "시군구";
pub const PHOTO_COLUMN: &str = "사진 경로";

/// Columns every upload must carry, matched by exact header text
pub const REQUIRED_COLUMNS: [&str; 7] = [
    ADDRESS_COLUMN,
    LATITUDE_COLUMN,
    LONGITUDE_COLUMN,
    HOUSING_TYPE_COLUMN,
    AREA_COLUMN,
    DISTRICT_COLUMN,
    PHOTO_COLUMN,
];

/// Positions of the required columns in a validated table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSchema {
    address: usize,
    latitude: usize,
    longitude: usize,
    housing_type: usize,
    area: usize,
    district: usize,
    photo_ref: usize,
}

impl ColumnSchema {
    /// Resolve every required column, reporting all missing names at once
    pub fn resolve(table: &Table) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| table.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(BinjipError::MissingColumns { missing });
        }

        let index = |name: &str| table.column_index(name).unwrap_or_default();

        Ok(Self {
            address: index(ADDRESS_COLUMN),
            latitude: index(LATITUDE_COLUMN),
            longitude: index(LONGITUDE_COLUMN),
            housing_type: index(HOUSING_TYPE_COLUMN),
            area: index(AREA_COLUMN),
            district: index(DISTRICT_COLUMN),
            photo_ref: index(PHOTO_COLUMN),
        })
    }

    /// Build a record from a data row, `None` when a coordinate is missing
    fn record(&self, row: &[CellValue], row_number: usize) -> Option<Record> {
        let cell = |idx: usize| row.get(idx).unwrap_or(&CellValue::Empty);

        let latitude = cell(self.latitude).as_f64()?;
        let longitude = cell(self.longitude).as_f64()?;

        Some(Record {
            address: cell(self.address).as_text(),
            latitude,
            longitude,
            housing_type: cell(self.housing_type).as_text(),
            area: cell(self.area).as_f64(),
            district: cell(self.district).as_text(),
            photo_ref: cell(self.photo_ref).as_text(),
            row_number,
        })
    }
}

/// Outcome of loading an upload
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Rows with valid coordinates, in spreadsheet order
    pub records: Vec<Record>,

    /// Number of data rows in the sheet
    pub total_rows: usize,

    /// Spreadsheet row numbers of rows dropped for missing coordinates
    pub dropped_row_numbers: Vec<usize>,
}

impl LoadReport {
    pub fn dropped_rows(&self) -> usize {
        self.dropped_row_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct district and housing type values for the selectors
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.records)
    }

    /// Serializable counts without the records themselves
    pub fn summary(&self) -> LoadSummary {
        LoadSummary {
            total_rows: self.total_rows,
            retained_rows: self.records.len(),
            dropped_rows: self.dropped_rows(),
            dropped_row_numbers: self.dropped_row_numbers.clone(),
        }
    }
}

/// Row counts reported back to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub total_rows: usize,
    pub retained_rows: usize,
    pub dropped_rows: usize,
    pub dropped_row_numbers: Vec<usize>,
}

/// Validate a table and coerce its rows into records
pub fn load_records(table: &Table) -> Result<LoadReport> {
    let schema = ColumnSchema::resolve(table)?;

    let mut records = Vec::with_capacity(table.row_count());
    let mut dropped_row_numbers = Vec::new();

    for (idx, row) in table.rows.iter().enumerate() {
        // Header occupies row 1
        let row_number = idx + 2;
        match schema.record(row, row_number) {
            Some(record) => records.push(record),
            None => dropped_row_numbers.push(row_number),
        }
    }

    if !dropped_row_numbers.is_empty() {
        tracing::debug!(
            dropped = dropped_row_numbers.len(),
            rows = ?dropped_row_numbers,
            "Dropped rows with non-numeric coordinates"
        );
    }

    tracing::info!(
        total_rows = table.row_count(),
        retained = records.len(),
        dropped = dropped_row_numbers.len(),
        "Loaded building records"
    );

    Ok(LoadReport {
        records,
        total_rows: table.row_count(),
        dropped_row_numbers,
    })
}

/// Read an uploaded spreadsheet and load its records
pub fn load_upload(file_name: &str, bytes: &[u8]) -> Result<LoadReport> {
    let table = TableFormatRegistry::default().read(file_name, bytes)?;
    load_records(&table)
}
