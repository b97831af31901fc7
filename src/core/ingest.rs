//! Discovery and concatenation of the period export files.

use crate::errors::{AppError, AppResult};
use crate::models::frame::{Frame, FrameRow, RowOrigin, canonical_column};
use csv::ReaderBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Files in `dir` (non-recursive) whose extension matches, sorted by name.
pub fn discover_files(dir: &Path, extension: &str) -> AppResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AppError::InputDirMissing(dir.display().to_string()));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension))
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Load every recognized file in `dir` into one frame, aligning columns by
/// header name and keeping row order file by file.
pub fn ingest_dir(dir: &Path, extension: &str) -> AppResult<Frame> {
    let files = discover_files(dir, extension)?;
    if files.is_empty() {
        return Err(AppError::NoInputFiles {
            dir: dir.display().to_string(),
            extension: extension.to_string(),
        });
    }

    let mut frame = Frame::default();
    for file in &files {
        append_file(&mut frame, file)?;
    }
    Ok(frame)
}

/// Read one file and append its rows to `frame`.
pub fn append_file(frame: &mut Frame, path: &Path) -> AppResult<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let malformed = |reason: String| AppError::MalformedFile {
        file: file_name.clone(),
        reason,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| malformed(e.to_string()))?;

    let headers = rdr.headers().map_err(|e| malformed(e.to_string()))?.clone();
    if headers.is_empty() {
        return Err(malformed("missing header row".to_string()));
    }

    // Position of each of this file's columns in the unified frame.
    let mut mapping = Vec::with_capacity(headers.len());
    for h in headers.iter() {
        let name = canonical_column(h);
        let idx = match frame.column_index(&name) {
            Some(i) => i,
            None => {
                frame.columns.push(name);
                frame.columns.len() - 1
            }
        };
        mapping.push(idx);
    }

    for result in rdr.records() {
        let record = result.map_err(|e| malformed(e.to_string()))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let mut cells = vec![String::new(); frame.columns.len()];
        for (value, &idx) in record.iter().zip(&mapping) {
            cells[idx] = value.to_string();
        }

        frame.rows.push(FrameRow {
            origin: RowOrigin {
                file: file_name.clone(),
                line,
            },
            cells,
            date: None,
        });
    }

    frame.files += 1;
    Ok(())
}
