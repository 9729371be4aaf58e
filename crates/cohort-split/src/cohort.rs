//! Cohort assembly: the participants present in both the phenotype and
//! covariate tables after exclusion.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tracing::{debug, info};

use cohort_ingest::participant_ids;
use cohort_model::{COHORT_ID_COLUMN, ExclusionSet, ParticipantId};
use cohort_transform::{apply_exclusions, drop_incomplete_rows};

use crate::error::Result;

/// Missing-data handling for cohort assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CohortOptions {
    /// Keep covariate rows that have missing values.
    pub allow_missing_covariates: bool,
    /// Keep phenotype rows that have missing values.
    pub allow_missing_phenotypes: bool,
}

/// Returns the sorted identifiers eligible for splitting.
///
/// Both tables are keyed on `s`. Excluded identifiers are removed, rows with
/// any missing value are dropped unless the matching option allows them, and
/// the remaining identifier sets are intersected.
pub fn assemble_cohort(
    phenotypes: &DataFrame,
    covariates: &DataFrame,
    exclusions: &ExclusionSet,
    options: &CohortOptions,
) -> Result<Vec<ParticipantId>> {
    let phenotypes = complete_rows(
        &apply_exclusions(phenotypes, exclusions, COHORT_ID_COLUMN)?,
        options.allow_missing_phenotypes,
    )?;
    let covariates = complete_rows(
        &apply_exclusions(covariates, exclusions, COHORT_ID_COLUMN)?,
        options.allow_missing_covariates,
    )?;

    let phenotype_ids = id_set(&phenotypes)?;
    let covariate_ids = id_set(&covariates)?;
    debug!(
        phenotypes = phenotype_ids.len(),
        covariates = covariate_ids.len(),
        "eligible rows after exclusion"
    );

    let cohort: Vec<ParticipantId> = phenotype_ids
        .intersection(&covariate_ids)
        .copied()
        .collect();
    info!(
        participants = cohort.len(),
        excluded = exclusions.len(),
        "cohort assembled"
    );
    Ok(cohort)
}

fn complete_rows(df: &DataFrame, allow_missing: bool) -> Result<DataFrame> {
    if allow_missing {
        Ok(df.clone())
    } else {
        Ok(drop_incomplete_rows(df)?)
    }
}

fn id_set(df: &DataFrame) -> Result<BTreeSet<ParticipantId>> {
    Ok(participant_ids(df, COHORT_ID_COLUMN)?
        .into_iter()
        .flatten()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn values(ids: &[ParticipantId]) -> Vec<i64> {
        ids.iter().map(|id| id.value()).collect()
    }

    #[test]
    fn intersects_identifier_sets() {
        let pheno = DataFrame::new(vec![
            Series::new("s".into(), &[1i64, 2, 3]).into_column(),
            Series::new("LDL".into(), &[1.0f64, 2.0, 3.0]).into_column(),
        ])
        .unwrap();
        let covar = DataFrame::new(vec![
            Series::new("s".into(), &[2i64, 3, 4]).into_column(),
            Series::new("p31".into(), &["Male", "Female", "Male"]).into_column(),
        ])
        .unwrap();
        let cohort =
            assemble_cohort(&pheno, &covar, &ExclusionSet::new(), &CohortOptions::default())
                .unwrap();
        assert_eq!(values(&cohort), vec![2, 3]);
    }
}
