//! Unified application error type.
//! All modules (core, db, export, cli) return AppError so a failed run is
//! reported once, with its cause, by `main`.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / input
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input directory not found: {0}")]
    InputDirMissing(String),

    #[error("No .{extension} files found in {dir}")]
    NoInputFiles { dir: String, extension: String },

    #[error("Malformed file {file}: {reason}")]
    MalformedFile { file: String, reason: String },

    // ---------------------------
    // Data quality
    // ---------------------------
    #[error("Missing column '{column}' in {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("Invalid Logged Hours '{value}' at {file}:{line}")]
    InvalidHours {
        file: String,
        line: u64,
        value: String,
    },

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Store
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Table '{0}' already contains rows (use --replace to reload)")]
    StoreNotEmpty(String),

    #[error("No surrogate key for {dimension} value '{value}'")]
    UnresolvedKey { dimension: String, value: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    #[error("Failed to save configuration: {0}")]
    ConfigSave(String),
}

pub type AppResult<T> = Result<T, AppError>;
