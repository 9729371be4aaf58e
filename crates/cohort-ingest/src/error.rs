//! Error types for participant data access.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading participant data.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Data Source Errors ===
    /// The backing data source could not serve the request.
    #[error("data source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// Requested column is not part of the data source.
    #[error("column '{column}' not found in data source")]
    ColumnNotFound { column: String },

    /// Field pattern failed to compile.
    #[error("invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),

    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Tabular Format Errors ===
    /// Failed to parse a tab-delimited file.
    #[error("failed to parse TSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to serialize a tab-delimited file.
    #[error("failed to write TSV {path}: {message}")]
    CsvWrite { path: PathBuf, message: String },

    /// A cell could not be interpreted.
    #[error("invalid {field} value '{value}' in {path} (line {line})")]
    InvalidValue {
        field: String,
        value: String,
        path: PathBuf,
        line: usize,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
