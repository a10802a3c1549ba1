use serde::{Deserialize, Serialize};

/// One validated building entry from the uploaded spreadsheet.
///
/// Coordinates are always present: rows whose latitude or longitude cannot be
/// read as a number never become a `Record`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Street address (주소명)
    pub address: String,

    /// Latitude in degrees (위도)
    pub latitude: f64,

    /// Longitude in degrees (경도)
    pub longitude: f64,

    /// Housing type (주택유형)
    pub housing_type: String,

    /// Floor area in square meters (면적), `None` when the cell is not numeric
    pub area: Option<f64>,

    /// District name (시군구)
    pub district: String,

    /// File name of the matching photo (사진 경로)
    pub photo_ref: String,

    /// 1-based spreadsheet row the record was read from (header is row 1)
    pub row_number: usize,
}

impl Record {
    /// Area formatted for display, `-` when unknown
    pub fn area_label(&self) -> String {
        match self.area {
            Some(area) => area.to_string(),
            None => "-".to_string(),
        }
    }
}
