use crate::errors::AppResult;
use crate::models::frame::{COL_DATE, Frame};
use crate::utils::date::parse_lenient;

/// Parse the `Date` column of every row. Values that do not parse leave the
/// row with no date; the row itself is kept.
pub fn clean_dates(frame: &mut Frame) -> AppResult<usize> {
    let idx = frame.require_column(COL_DATE)?;

    let mut unparsed = 0;
    for row in &mut frame.rows {
        row.date = parse_lenient(Frame::cell(row, idx));
        if row.date.is_none() {
            unparsed += 1;
        }
    }
    Ok(unparsed)
}
