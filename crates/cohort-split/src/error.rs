//! Error types for cohort assembly and splitting.

use std::path::PathBuf;
use thiserror::Error;

use cohort_ingest::IngestError;
use cohort_transform::TransformError;

#[derive(Debug, Error)]
pub enum SplitError {
    /// Split fractions are negative, not finite, or leave nothing for the test set.
    #[error("invalid split proportions train={train}, val={val}: {reason}")]
    InvalidProportions {
        train: f64,
        val: f64,
        reason: &'static str,
    },

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write split manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, SplitError>;
