use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Reading an engagement table failed.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("data source not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet read error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    #[error("source has no header row")]
    MissingHeader,

    #[error("required column '{column}' not found in the first {span} columns")]
    MissingColumn { column: &'static str, span: usize },

    #[error("invalid structure: {0}")]
    InvalidStructure(String),
}

/// The current selection matched no rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No data available based on the current filter settings!")]
pub struct EmptyResultWarning;

/// The settings file could not be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
