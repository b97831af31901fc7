use crate::errors::{AppError, AppResult};
use crate::models::activity::ActivityRecord;
use crate::models::frame::{
    COL_BRAND, COL_DEPARTMENT, COL_ID, COL_LOCATION, COL_LOGGED_HOURS, COL_PERSON, COL_TYPE,
    ESSENTIAL_COLUMNS, Frame, FrameRow,
};

/// Reduce the frame to the essential attributes as typed records.
/// Fails if any essential column is absent.
pub fn project(frame: &Frame) -> AppResult<Vec<ActivityRecord>> {
    for column in ESSENTIAL_COLUMNS {
        frame.require_column(column)?;
    }

    let id = frame.require_column(COL_ID)?;
    let location = frame.require_column(COL_LOCATION)?;
    let brand = frame.require_column(COL_BRAND)?;
    let department = frame.require_column(COL_DEPARTMENT)?;
    let kind = frame.require_column(COL_TYPE)?;
    let person = frame.require_column(COL_PERSON)?;
    let hours = frame.require_column(COL_LOGGED_HOURS)?;

    frame
        .rows
        .iter()
        .map(|row| {
            Ok(ActivityRecord {
                origin: row.origin.clone(),
                id: Frame::cell(row, id).to_string(),
                location: Frame::cell(row, location).to_string(),
                brand: Frame::cell(row, brand).to_string(),
                department: Frame::cell(row, department).to_string(),
                kind: Frame::cell(row, kind).to_string(),
                person: Frame::cell(row, person).to_string(),
                date: row.date,
                logged_hours: parse_hours(row, Frame::cell(row, hours))?,
            })
        })
        .collect()
}

/// Empty hours count as zero; anything else must be a number.
fn parse_hours(row: &FrameRow, raw: &str) -> AppResult<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    s.parse::<f64>()
        .ok()
        .filter(|h| h.is_finite())
        .ok_or_else(|| AppError::InvalidHours {
            file: row.origin.file.clone(),
            line: row.origin.line,
            value: raw.to_string(),
        })
}
