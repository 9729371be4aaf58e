//! LDL cholesterol with adjustment for cholesterol-lowering medication.

use std::collections::BTreeMap;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use cohort_ingest::{f64_values, participant_ids, string_values};
use cohort_model::{COHORT_ID_COLUMN, ColumnName, FieldId, SOURCE_ID_COLUMN};

use super::{PhenotypeFrame, PhenotypeSpec, ValueCount};
use crate::error::{Result, TransformError};
use crate::frame::{field_columns, require_column};

pub const LDL_COLUMN: &str = "LDL";
pub const LDL_ADJUSTED_COLUMN: &str = "LDL_adj";
pub const MEDICATION_COLUMN: &str = "cholesterol_med";

/// Field identifiers and derivation constants for the LDL phenotype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdlConfig {
    /// LDL direct measurement, recorded at two assessment visits.
    pub measurement: FieldId,
    /// Medication question asked of female participants.
    pub female_medication: FieldId,
    /// Medication question asked of male participants.
    pub male_medication: FieldId,
    /// Assessment visit providing both the measurement and the medication answers.
    pub instance: u32,
    /// Answer text identifying statin use.
    pub medication_marker: String,
    pub female_match_case_insensitive: bool,
    pub male_match_case_insensitive: bool,
    /// Measured LDL under medication is divided by this factor.
    pub medication_correction: f64,
}

impl Default for LdlConfig {
    fn default() -> Self {
        Self {
            measurement: FieldId::new(30780),
            female_medication: FieldId::new(6153),
            male_medication: FieldId::new(6177),
            instance: 0,
            medication_marker: "Cholesterol lowering medication".to_string(),
            // Female answers match case-insensitively, male answers exactly.
            female_match_case_insensitive: true,
            male_match_case_insensitive: false,
            medication_correction: 0.7,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LdlPhenotype {
    config: LdlConfig,
}

impl LdlPhenotype {
    pub fn new(config: LdlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LdlConfig {
        &self.config
    }

    fn medication_answers(&self, raw: &DataFrame, field: FieldId) -> Result<Vec<Vec<Option<String>>>> {
        let columns = field_columns(raw, field, Some(self.config.instance));
        if columns.is_empty() {
            warn!(field = %field, "medication field not recorded, treated as no medication");
        }
        columns
            .iter()
            .map(|name| string_values(raw, name).map_err(TransformError::from))
            .collect()
    }
}

fn mentions(answer: &str, marker: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        answer.to_lowercase().contains(&marker.to_lowercase())
    } else {
        answer.contains(marker)
    }
}

fn any_mentions(
    answers: &[Vec<Option<String>>],
    idx: usize,
    marker: &str,
    case_insensitive: bool,
) -> bool {
    answers.iter().any(|column| {
        column[idx]
            .as_deref()
            .is_some_and(|answer| mentions(answer, marker, case_insensitive))
    })
}

impl PhenotypeSpec for LdlPhenotype {
    fn name(&self) -> &'static str {
        "ldl"
    }

    fn description(&self) -> &'static str {
        "LDL cholesterol (LDL), statin use (cholesterol_med), and medication-adjusted LDL (LDL_adj)"
    }

    fn fields(&self) -> Vec<FieldId> {
        vec![
            self.config.measurement,
            self.config.female_medication,
            self.config.male_medication,
        ]
    }

    fn transform(&self, raw: &DataFrame) -> Result<PhenotypeFrame> {
        let config = &self.config;
        require_column(raw, SOURCE_ID_COLUMN)?;
        let measurement_column =
            ColumnName::new(config.measurement, Some(config.instance), None).to_string();
        if raw.column(&measurement_column).is_err() {
            return Err(TransformError::MissingField {
                field: config.measurement,
                label: "LDL measurement",
            });
        }

        // Only the configured visit is used; later visits are discarded, not averaged.
        let ids = participant_ids(raw, SOURCE_ID_COLUMN)?;
        let measurements = f64_values(raw, &measurement_column)?;
        let female = self.medication_answers(raw, config.female_medication)?;
        let male = self.medication_answers(raw, config.male_medication)?;

        let mut out_ids = Vec::new();
        let mut out_ldl = Vec::new();
        let mut out_med = Vec::new();
        let mut out_adjusted = Vec::new();
        let mut unidentified = 0usize;
        for (idx, (id, measurement)) in ids.iter().zip(measurements.iter()).enumerate() {
            let Some(ldl) = measurement.filter(|value| !value.is_nan()) else {
                continue;
            };
            let Some(id) = id else {
                unidentified += 1;
                continue;
            };
            let on_medication = any_mentions(
                &female,
                idx,
                &config.medication_marker,
                config.female_match_case_insensitive,
            ) || any_mentions(
                &male,
                idx,
                &config.medication_marker,
                config.male_match_case_insensitive,
            );
            let adjusted = if on_medication {
                ldl / config.medication_correction
            } else {
                ldl
            };
            out_ids.push(id.value());
            out_ldl.push(ldl);
            out_med.push(i32::from(on_medication));
            out_adjusted.push(adjusted);
        }
        if unidentified > 0 {
            warn!(rows = unidentified, "rows without participant identifier dropped");
        }

        let mut tally: BTreeMap<i32, usize> = BTreeMap::new();
        for flag in &out_med {
            *tally.entry(*flag).or_default() += 1;
        }
        let counts: Vec<ValueCount> = tally
            .into_iter()
            .map(|(value, count)| ValueCount {
                column: MEDICATION_COLUMN.to_string(),
                value: value.to_string(),
                count,
            })
            .collect();
        info!(
            participants = raw.height(),
            retained = out_ids.len(),
            on_medication = out_med.iter().filter(|flag| **flag == 1).count(),
            "ldl phenotype derived"
        );

        let data = DataFrame::new(vec![
            Series::new(COHORT_ID_COLUMN.into(), out_ids).into_column(),
            Series::new(LDL_COLUMN.into(), out_ldl).into_column(),
            Series::new(MEDICATION_COLUMN.into(), out_med).into_column(),
            Series::new(LDL_ADJUSTED_COLUMN.into(), out_adjusted).into_column(),
        ])?;
        Ok(PhenotypeFrame { data, counts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_sensitivity_follows_config() {
        let marker = "Cholesterol lowering medication";
        assert!(mentions("Cholesterol Lowering Medication", marker, true));
        assert!(!mentions("Cholesterol Lowering Medication", marker, false));
        assert!(mentions("Insulin|Cholesterol lowering medication", marker, false));
    }

    #[test]
    fn fields_follow_config() {
        let spec = LdlPhenotype::default();
        assert_eq!(
            spec.fields(),
            vec![FieldId::new(30780), FieldId::new(6153), FieldId::new(6177)]
        );
    }
}
