//! Tests for exclusion-set derivation and application.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use cohort_ingest::FrameSource;
use cohort_model::{ExclusionSet, ParticipantId};
use cohort_transform::{
    CovariateFields, QualityControlFields, apply_exclusions, build_exclusion_set,
    extract_covariates,
};

/// eid, QC pass (22020), aneuploidy (22019), outlier (22027).
fn quality_control_source(rows: &[(i64, Option<i64>, Option<i64>, Option<i64>)]) -> FrameSource {
    let frame = DataFrame::new(vec![
        Series::new("eid".into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()).into_column(),
        Series::new("p22020".into(), rows.iter().map(|r| r.1).collect::<Vec<_>>()).into_column(),
        Series::new("p22019".into(), rows.iter().map(|r| r.2).collect::<Vec<_>>()).into_column(),
        Series::new("p22027".into(), rows.iter().map(|r| r.3).collect::<Vec<_>>()).into_column(),
        Series::new("p31".into(), rows.iter().map(|_| "Female").collect::<Vec<_>>()).into_column(),
    ])
    .unwrap();
    FrameSource::new(frame)
}

fn ids(set: &ExclusionSet) -> Vec<i64> {
    set.iter().map(ParticipantId::value).collect()
}

#[test]
fn aneuploidy_alone_triggers_exclusion() {
    let source = quality_control_source(&[(1, Some(1), Some(1), None)]);
    let excluded = build_exclusion_set(&source, &QualityControlFields::default()).unwrap();
    assert_eq!(ids(&excluded), vec![1]);
}

#[test]
fn each_predicate_excludes_independently() {
    let source = quality_control_source(&[
        (1, Some(1), None, None),    // clean
        (2, None, None, None),       // QC pass missing
        (3, Some(1), None, Some(1)), // outlier
        (4, Some(1), Some(1), None), // aneuploidy
        (5, None, Some(1), Some(1)), // everything
    ]);
    let excluded = build_exclusion_set(&source, &QualityControlFields::default()).unwrap();
    assert_eq!(ids(&excluded), vec![2, 3, 4, 5]);
}

#[test]
fn exclusion_is_idempotent() {
    let df = DataFrame::new(vec![
        Series::new("s".into(), &[1i64, 2, 3, 4]).into_column(),
        Series::new("LDL".into(), &[1.0f64, 2.0, 3.0, 4.0]).into_column(),
    ])
    .unwrap();
    let exclusions: ExclusionSet = [2, 4, 99].into_iter().map(ParticipantId::new).collect();
    let once = apply_exclusions(&df, &exclusions, "s").unwrap();
    let twice = apply_exclusions(&once, &exclusions, "s").unwrap();
    assert_eq!(once.height(), 2);
    assert!(once.equals(&twice));
}

#[test]
fn exclusion_commutes_with_renaming() {
    let source = quality_control_source(&[
        (1, Some(1), None, None),
        (2, None, None, None),
        (3, Some(1), None, None),
    ]);
    let exclusions = build_exclusion_set(&source, &QualityControlFields::default()).unwrap();
    let fields = CovariateFields {
        fields: vec![cohort_model::FieldId::new(31)],
    };
    let filtered_first = extract_covariates(&source, &fields, Some(&exclusions)).unwrap();
    let filtered_last =
        apply_exclusions(&extract_covariates(&source, &fields, None).unwrap(), &exclusions, "s")
            .unwrap();
    assert!(filtered_first.equals(&filtered_last));
    assert_eq!(filtered_first.height(), 2);
}

#[test]
fn missing_identifier_column_is_an_error() {
    let df = DataFrame::new(vec![Series::new("eid".into(), &[1i64]).into_column()]).unwrap();
    let exclusions: ExclusionSet = [ParticipantId::new(1)].into_iter().collect();
    assert!(apply_exclusions(&df, &exclusions, "s").is_err());
}
