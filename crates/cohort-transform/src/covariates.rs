//! Covariate extraction.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::info;

use cohort_ingest::{DataSource, retrieve_fields};
use cohort_model::{COHORT_ID_COLUMN, ExclusionSet, FieldId, SOURCE_ID_COLUMN};

use crate::error::Result;
use crate::exclusion::apply_exclusions;
use crate::frame::rename_column;

/// Fields written to the covariate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CovariateFields {
    pub fields: Vec<FieldId>,
}

impl Default for CovariateFields {
    fn default() -> Self {
        Self {
            fields: vec![
                FieldId::new(22006), // white British ancestry
                FieldId::new(22009), // genetic principal components
                FieldId::new(31),    // sex
                FieldId::new(21022), // age at recruitment
            ],
        }
    }
}

/// Retrieves covariates for the non-excluded participants.
///
/// Missing values are kept; the identifier column is renamed to `s` so the
/// table joins with phenotype files.
pub fn extract_covariates<S>(
    source: &S,
    fields: &CovariateFields,
    exclusions: Option<&ExclusionSet>,
) -> Result<DataFrame>
where
    S: DataSource + ?Sized,
{
    let raw = retrieve_fields(&fields.fields, source)?;
    let raw = match exclusions {
        Some(set) => apply_exclusions(&raw, set, SOURCE_ID_COLUMN)?,
        None => raw,
    };
    let covariates = rename_column(&raw, SOURCE_ID_COLUMN, COHORT_ID_COLUMN)?;
    info!(
        participants = covariates.height(),
        columns = covariates.width(),
        "covariates extracted"
    );
    Ok(covariates)
}
