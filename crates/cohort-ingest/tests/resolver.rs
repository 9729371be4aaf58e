//! Integration tests for field resolution and retrieval.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use regex::Regex;

use cohort_ingest::{
    DataSource, FrameSource, IngestError, resolve_field_names, retrieve_fields,
};
use cohort_model::FieldId;

fn participant_table(columns: &[&str]) -> FrameSource {
    let mut cols: Vec<Column> = vec![Series::new("eid".into(), &[1i64, 2, 3]).into_column()];
    for name in columns {
        cols.push(Series::new((*name).into(), &[1.0f64, 2.0, 3.0]).into_column());
    }
    FrameSource::new(DataFrame::new(cols).unwrap())
}

struct OfflineSource;

impl DataSource for OfflineSource {
    fn find_columns(&self, _pattern: &Regex) -> cohort_ingest::Result<Vec<String>> {
        Err(IngestError::SourceUnavailable {
            message: "connection refused".to_string(),
        })
    }

    fn retrieve(&self, _columns: &[String]) -> cohort_ingest::Result<DataFrame> {
        Err(IngestError::SourceUnavailable {
            message: "connection refused".to_string(),
        })
    }
}

#[test]
fn instances_are_ordered_numerically() {
    let source = participant_table(&["p30780_i2", "p30780_i10", "p30780_i1"]);
    let names = resolve_field_names(&[FieldId::new(30780)], &source).unwrap();
    assert_eq!(names, vec!["p30780_i1", "p30780_i2", "p30780_i10"]);
}

#[test]
fn resolution_aggregates_fields_and_skips_lookalikes() {
    let source = participant_table(&[
        "p30780_i0",
        "p30780_i1",
        "p307800",
        "p6153_i0",
        "p6177_i0",
        "p6153_i0_x",
        "p61530_i0",
    ]);
    let fields = [FieldId::new(30780), FieldId::new(6153), FieldId::new(6177)];
    let names = resolve_field_names(&fields, &source).unwrap();
    insta::assert_debug_snapshot!(names, @r#"
    [
        "p6153_i0",
        "p6177_i0",
        "p30780_i0",
        "p30780_i1",
    ]
    "#);
}

#[test]
fn unrecorded_field_resolves_to_nothing() {
    let source = participant_table(&["p31"]);
    let names = resolve_field_names(&[FieldId::new(21022)], &source).unwrap();
    assert!(names.is_empty());
}

#[test]
fn repeated_identifier_is_resolved_once() {
    let source = participant_table(&["p31"]);
    let names = resolve_field_names(&[FieldId::new(31), FieldId::new(31)], &source).unwrap();
    assert_eq!(names, vec!["p31"]);
}

#[test]
fn retrieve_prepends_participant_identifier() {
    let source = participant_table(&["p31", "p21022"]);
    let df = retrieve_fields(&[FieldId::new(21022), FieldId::new(31)], &source).unwrap();
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["eid", "p31", "p21022"]);
    assert_eq!(df.height(), 3);
}

#[test]
fn source_failure_is_propagated_unchanged() {
    let err = retrieve_fields(&[FieldId::new(31)], &OfflineSource).unwrap_err();
    assert!(matches!(
        err,
        IngestError::SourceUnavailable { ref message } if message == "connection refused"
    ));
}
