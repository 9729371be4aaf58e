//! Sample exclusion: deriving the exclusion set and applying it to tables.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use cohort_ingest::{DataSource, participant_ids, retrieve_fields};
use cohort_model::{ExclusionSet, FieldId, SOURCE_ID_COLUMN};

use crate::error::{Result, TransformError};
use crate::frame::{any_present, field_columns, filter_rows, require_column};

/// Quality-control fields used to derive the exclusion set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityControlFields {
    /// Passed the genotyping PCA quality checks; exclude when absent.
    pub qc_pass: FieldId,
    /// Sex chromosome aneuploidy; exclude when present.
    pub aneuploidy: FieldId,
    /// Outlier for heterozygosity or missing rate; exclude when present.
    pub outlier: FieldId,
}

impl Default for QualityControlFields {
    fn default() -> Self {
        Self {
            qc_pass: FieldId::new(22020),
            aneuploidy: FieldId::new(22019),
            outlier: FieldId::new(22027),
        }
    }
}

impl QualityControlFields {
    pub fn field_ids(&self) -> [FieldId; 3] {
        [self.qc_pass, self.aneuploidy, self.outlier]
    }
}

/// Retrieves the quality-control fields and derives the exclusion set.
pub fn build_exclusion_set<S>(source: &S, fields: &QualityControlFields) -> Result<ExclusionSet>
where
    S: DataSource + ?Sized,
{
    let df = retrieve_fields(&fields.field_ids(), source)?;
    exclusion_set_from_frame(&df, fields)
}

/// Derives the exclusion set from an already retrieved quality-control table.
///
/// A participant is excluded when the aneuploidy flag is present, the QC-pass
/// flag is absent, or the outlier flag is present.
pub fn exclusion_set_from_frame(
    df: &DataFrame,
    fields: &QualityControlFields,
) -> Result<ExclusionSet> {
    require_column(df, SOURCE_ID_COLUMN)?;
    let qc_pass = required_field_columns(df, fields.qc_pass, "QC pass")?;
    let aneuploidy = required_field_columns(df, fields.aneuploidy, "sex chromosome aneuploidy")?;
    let outlier = required_field_columns(df, fields.outlier, "heterozygosity/missingness outlier")?;

    let ids = participant_ids(df, SOURCE_ID_COLUMN)?;
    let mut excluded = ExclusionSet::new();
    let (mut failed_qc, mut aneuploid, mut outliers, mut unidentified) = (0usize, 0, 0, 0);
    for (idx, id) in ids.into_iter().enumerate() {
        let Some(id) = id else {
            unidentified += 1;
            continue;
        };
        let is_aneuploid = any_present(df, &aneuploidy, idx)?;
        let missing_qc = !any_present(df, &qc_pass, idx)?;
        let is_outlier = any_present(df, &outlier, idx)?;
        aneuploid += usize::from(is_aneuploid);
        failed_qc += usize::from(missing_qc);
        outliers += usize::from(is_outlier);
        if is_aneuploid || missing_qc || is_outlier {
            excluded.insert(id);
        }
    }
    if unidentified > 0 {
        warn!(rows = unidentified, "rows without participant identifier ignored");
    }
    info!(
        participants = df.height(),
        excluded = excluded.len(),
        failed_qc,
        aneuploid,
        outliers,
        "exclusion set derived"
    );
    Ok(excluded)
}

fn required_field_columns(df: &DataFrame, field: FieldId, label: &'static str) -> Result<Vec<String>> {
    let columns = field_columns(df, field, None);
    if columns.is_empty() {
        return Err(TransformError::MissingField { field, label });
    }
    Ok(columns)
}

/// Returns `df` without the rows whose `id_column` value is excluded.
///
/// Rows with a missing identifier are kept. An empty exclusion set returns an
/// unchanged copy.
pub fn apply_exclusions(
    df: &DataFrame,
    exclusions: &ExclusionSet,
    id_column: &str,
) -> Result<DataFrame> {
    require_column(df, id_column)?;
    if exclusions.is_empty() {
        return Ok(df.clone());
    }
    let keep: Vec<bool> = participant_ids(df, id_column)?
        .into_iter()
        .map(|id| id.is_none_or(|id| !exclusions.contains(id)))
        .collect();
    let filtered = filter_rows(df, &keep)?;
    debug!(
        before = df.height(),
        after = filtered.height(),
        "excluded samples removed"
    );
    Ok(filtered)
}
