//! Error types for cohort transformations.

use thiserror::Error;

use cohort_ingest::IngestError;
use cohort_model::FieldId;

/// Errors raised while deriving exclusion sets, phenotypes, or covariates.
#[derive(Debug, Error)]
pub enum TransformError {
    /// No transformation is registered under the requested name.
    #[error("unsupported phenotype '{name}' (supported: {supported})")]
    UnsupportedPhenotype { name: String, supported: String },

    /// A field required by the derivation has no column in the source.
    #[error("required field {field} ({label}) is not recorded in the data source")]
    MissingField { field: FieldId, label: &'static str },

    /// A column required by the derivation is absent from the table.
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    /// Data source or file failure, passed through untouched.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
