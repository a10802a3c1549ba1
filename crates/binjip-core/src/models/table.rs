use std::fmt;

/// A single spreadsheet cell, normalised across input formats
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Build a cell from raw text, treating blank text as empty
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(text.to_string())
        }
    }

    /// Coerce the cell to a finite number.
    ///
    /// Text is trimmed and parsed; anything that does not yield a finite
    /// value is treated as missing.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            CellValue::Empty => return None,
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Display form of the cell, trimmed
    pub fn as_text(&self) -> String {
        self.to_string().trim().to_string()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// In-memory table read from the first sheet of an upload
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Header row, in column order
    pub headers: Vec<String>,

    /// Data rows; a row may be shorter than the header row
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// Index of the first column with exactly this header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
