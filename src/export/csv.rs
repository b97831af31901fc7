use crate::errors::AppResult;
use crate::models::aggregated::{AggregatedRow, TransformedRow};
use crate::utils::path::{ensure_parent_dir, partial_path};
use csv::Writer;
use std::fs;
use std::path::Path;

/// Write the aggregated table with its header row. Rows go to a `.partial`
/// sibling first, which is renamed onto `path` only once fully flushed.
pub fn write_transformed(path: &Path, rows: &[AggregatedRow]) -> AppResult<()> {
    ensure_parent_dir(path)?;
    let tmp = partial_path(path);

    let written = write_rows(&tmp, rows);
    if let Err(e) = written {
        fs::remove_file(&tmp).ok();
        return Err(e);
    }

    fs::rename(&tmp, path)?;
    Ok(())
}

fn write_rows(path: &Path, rows: &[AggregatedRow]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    if rows.is_empty() {
        wtr.write_record(TRANSFORMED_HEADERS)?;
    }
    for row in rows {
        wtr.serialize(TransformedRow::from(row))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Read the intermediate artifact back.
pub fn read_transformed(path: &Path) -> AppResult<Vec<TransformedRow>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

pub const TRANSFORMED_HEADERS: [&str; 9] = [
    "Location",
    "Person>Brand",
    "Department",
    "Week of Year",
    "Type",
    "Date",
    "Total_Hours",
    "Persons",
    "Total_Utilized",
];
