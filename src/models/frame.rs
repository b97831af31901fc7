//! Untyped tabular data as ingested from the period export files.

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub const COL_ID: &str = "Id";
pub const COL_LOCATION: &str = "Location";
pub const COL_BRAND: &str = "Person>Brand";
pub const COL_DEPARTMENT: &str = "Department";
pub const COL_TYPE: &str = "Type";
pub const COL_PERSON: &str = "Person";
pub const COL_DATE: &str = "Date";
pub const COL_LOGGED_HOURS: &str = "Logged Hours";

/// Spelling used by the export tool for the brand column.
pub const COL_BRAND_EXPORTED: &str = "Person > Brand";

pub const ESSENTIAL_COLUMNS: [&str; 8] = [
    COL_ID,
    COL_LOCATION,
    COL_BRAND,
    COL_DEPARTMENT,
    COL_TYPE,
    COL_PERSON,
    COL_DATE,
    COL_LOGGED_HOURS,
];

/// Map a raw header onto its canonical column name.
pub fn canonical_column(header: &str) -> String {
    let h = header.trim();
    if h == COL_BRAND_EXPORTED {
        COL_BRAND.to_string()
    } else {
        h.to_string()
    }
}

/// Where a row came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOrigin {
    pub file: String,
    pub line: u64,
}

#[derive(Debug, Clone)]
pub struct FrameRow {
    pub origin: RowOrigin,
    pub cells: Vec<String>,
    /// Filled by the cleaner; `None` until then or when `Date` did not parse.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub columns: Vec<String>,
    pub rows: Vec<FrameRow>,
    pub files: usize,
}

impl Frame {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn require_column(&self, name: &str) -> AppResult<usize> {
        self.column_index(name).ok_or_else(|| AppError::MissingColumn {
            column: name.to_string(),
            source_name: "input files".to_string(),
        })
    }

    /// Cell value, empty when the row's file did not carry this column.
    pub fn cell<'a>(row: &'a FrameRow, idx: usize) -> &'a str {
        row.cells.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
