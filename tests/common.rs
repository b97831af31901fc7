#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use rutilization::models::activity::ActivityRecord;
use rutilization::models::frame::RowOrigin;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "Id,Location,Person>Brand,Department,Type,Person,Date,Logged Hours";

pub fn rut() -> Command {
    cargo_bin_cmd!("rutilization")
}

/// Fresh scratch directory inside the system temp dir.
pub fn setup_workspace(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rutilization", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(path.join("data")).expect("create workspace");
    path
}

/// Write a CSV file with `header` and `rows` (already comma-joined).
pub fn write_csv(dir: &Path, name: &str, header: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::from(header);
    content.push('\n');
    for r in rows {
        content.push_str(r);
        content.push('\n');
    }
    fs::write(&path, content).expect("write csv");
    path
}

/// Common CLI args pointing at workspace-local config and store.
pub fn ws_args(ws: &Path) -> Vec<String> {
    vec![
        "--config".to_string(),
        ws.join("rutilization.conf").to_string_lossy().to_string(),
        "--db".to_string(),
        ws.join("store.sqlite").to_string_lossy().to_string(),
    ]
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

/// Activity record with sensible defaults for the attributes a test does
/// not care about.
pub fn record(department: &str, kind: &str, person: &str, hours: f64, day: &str) -> ActivityRecord {
    ActivityRecord {
        origin: RowOrigin {
            file: "test.csv".to_string(),
            line: 2,
        },
        id: "1".to_string(),
        location: "Montreal".to_string(),
        brand: "Acme".to_string(),
        department: department.to_string(),
        kind: kind.to_string(),
        person: person.to_string(),
        date: Some(date(day)),
        logged_hours: hours,
    }
}
