//! Integration tests for the pipeline steps behind each subcommand.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use cohort_cli::pipeline::{self, SplitRequest};
use cohort_ingest::{read_id_list, read_tsv_table};
use cohort_model::ParticipantId;
use cohort_split::{CohortOptions, DEFAULT_SEED, SplitProportions};

const HEADER: [&str; 13] = [
    "eid",
    "p22020",
    "p22019",
    "p22027",
    "p22006",
    "p22009_a1",
    "p22009_a2",
    "p31",
    "p21022",
    "p30780_i0",
    "p30780_i1",
    "p6153_i0",
    "p6177_i0",
];

/// Participants 2-4 fail QC, 5 has no LDL at the first visit, 6 has no ancestry.
fn participant_rows() -> Vec<[&'static str; 13]> {
    let statin = "Cholesterol lowering medication";
    vec![
        ["1", "1", "", "", "1", "0.1", "0.2", "Female", "55", "3.5", "3.6", statin, ""],
        ["2", "", "", "", "1", "0.1", "0.2", "Male", "61", "3.1", "", "", ""],
        ["3", "1", "1", "", "1", "0.1", "0.2", "Female", "47", "2.9", "", "", ""],
        ["4", "1", "", "1", "1", "0.1", "0.2", "Male", "52", "3.3", "", "", ""],
        ["5", "1", "", "", "1", "0.1", "0.2", "Female", "66", "", "4.1", "", ""],
        ["6", "1", "", "", "", "0.1", "0.2", "Male", "58", "2.7", "", "", ""],
        ["7", "1", "", "", "1", "0.3", "0.1", "Female", "49", "3.0", "", "", ""],
        ["8", "1", "", "", "1", "0.2", "0.4", "Male", "63", "3.9", "", "", ""],
        ["9", "1", "", "", "1", "0.5", "0.3", "Female", "51", "2.2", "", "", ""],
        ["10", "1", "", "", "1", "0.6", "0.1", "Male", "45", "3.4", "", "", ""],
        ["11", "1", "", "", "1", "0.7", "0.2", "Female", "59", "4.4", "", "", ""],
        ["12", "1", "", "", "1", "0.8", "0.9", "Male", "68", "2.8", "", "", ""],
    ]
}

fn write_dataset(dir: &Path) -> PathBuf {
    let mut text = HEADER.join("\t");
    text.push('\n');
    for row in participant_rows() {
        text.push_str(&row.join("\t"));
        text.push('\n');
    }
    let path = dir.join("participants.tsv");
    fs::write(&path, text).unwrap();
    path
}

fn values(ids: &[ParticipantId]) -> Vec<i64> {
    ids.iter().map(|id| id.value()).collect()
}

struct Prepared {
    _dir: TempDir,
    root: PathBuf,
    excluded: PathBuf,
    phenotypes: PathBuf,
    covariates: PathBuf,
}

fn prepare() -> Prepared {
    let dir = TempDir::new().unwrap();
    let root = dir.path().to_path_buf();
    let dataset = write_dataset(&root);
    let excluded = root.join("excluded_samples.tsv");
    let phenotypes = root.join("ldl.tsv");
    let covariates = root.join("covariates.tsv");
    pipeline::exclusions(&dataset, &excluded).unwrap();
    pipeline::phenotype(&dataset, "ldl", Some(&excluded), Some(&phenotypes)).unwrap();
    pipeline::covariates(&dataset, Some(&excluded), &covariates).unwrap();
    Prepared {
        _dir: dir,
        root,
        excluded,
        phenotypes,
        covariates,
    }
}

fn split_request(prepared: &Prepared, options: CohortOptions) -> SplitRequest {
    SplitRequest {
        phenotypes: prepared.phenotypes.clone(),
        covariates: prepared.covariates.clone(),
        exclusions: Some(prepared.excluded.clone()),
        output_dir: prepared.root.join("splits"),
        prefix: "ldl".to_string(),
        proportions: SplitProportions::default(),
        seed: DEFAULT_SEED,
        options,
    }
}

#[test]
fn exclusions_lists_failed_participants() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(dir.path());
    let output = dir.path().join("excluded.tsv");
    let result = pipeline::exclusions(&dataset, &output).unwrap();
    assert_eq!(result.excluded, 3);
    assert_eq!(values(&read_id_list(&output).unwrap()), vec![2, 3, 4]);
    assert_eq!(fs::read_to_string(&output).unwrap(), "2\n3\n4\n");
}

#[test]
fn phenotype_writes_ldl_table() {
    let prepared = prepare();
    let df = read_tsv_table(&prepared.phenotypes).unwrap();
    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(columns, vec!["s", "LDL", "cholesterol_med", "LDL_adj"]);
    // 12 participants, 3 excluded, 1 without a first-visit measurement.
    assert_eq!(df.height(), 8);
}

#[test]
fn phenotype_reports_medication_counts() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(dir.path());
    let output = dir.path().join("ldl.tsv");
    let result = pipeline::phenotype(&dataset, "LDL", None, Some(&output)).unwrap();
    assert_eq!(result.label, "ldl");
    assert_eq!(result.rows, 11);
    let counts: Vec<(&str, usize)> = result
        .counts
        .iter()
        .map(|count| (count.value.as_str(), count.count))
        .collect();
    assert_eq!(counts, vec![("0", 10), ("1", 1)]);
}

#[test]
fn unknown_phenotype_is_rejected() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(dir.path());
    let output = dir.path().join("bmi.tsv");
    let err = pipeline::phenotype(&dataset, "bmi", None, Some(&output)).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"unsupported phenotype 'bmi' (supported: ldl)");
    assert!(!output.exists());
}

#[test]
fn covariates_are_keyed_on_s() {
    let prepared = prepare();
    let df = read_tsv_table(&prepared.covariates).unwrap();
    assert_eq!(df.get_column_names()[0].as_str(), "s");
    assert!(df.column("p22009_a2").is_ok());
    assert!(df.column("eid").is_err());
    assert_eq!(df.height(), 9);
}

#[test]
fn splits_cover_complete_cohort() {
    let prepared = prepare();
    let result = pipeline::splits(&split_request(&prepared, CohortOptions::default())).unwrap();
    // 1 and 7-12: participant 6 lacks ancestry, 5 has no phenotype row.
    assert_eq!(result.manifest.cohort_size, 7);
    assert_eq!(
        (result.manifest.train, result.manifest.val, result.manifest.test),
        (5, 0, 2)
    );

    let mut assigned: Vec<i64> = [&result.paths.train, &result.paths.val, &result.paths.test]
        .into_iter()
        .flat_map(|path| values(&read_id_list(path).unwrap()))
        .collect();
    assigned.sort_unstable();
    assert_eq!(assigned, vec![1, 7, 8, 9, 10, 11, 12]);
}

#[test]
fn allow_missing_covariates_keeps_participant() {
    let prepared = prepare();
    let options = CohortOptions {
        allow_missing_covariates: true,
        ..CohortOptions::default()
    };
    let result = pipeline::splits(&split_request(&prepared, options)).unwrap();
    assert_eq!(result.manifest.cohort_size, 8);
}

#[test]
fn splits_are_reproducible() {
    let prepared = prepare();
    let request = split_request(&prepared, CohortOptions::default());
    let first = pipeline::splits(&request).unwrap();
    let train = fs::read_to_string(&first.paths.train).unwrap();
    let second = pipeline::splits(&request).unwrap();
    assert_eq!(fs::read_to_string(&second.paths.train).unwrap(), train);
    assert_eq!(first.manifest.cohort_sha256, second.manifest.cohort_sha256);
}

#[test]
fn missing_phenotype_file_is_an_error() {
    let prepared = prepare();
    let mut request = split_request(&prepared, CohortOptions::default());
    request.phenotypes = prepared.root.join("absent.tsv");
    let err = pipeline::splits(&request).unwrap_err();
    assert!(format!("{err:#}").contains("absent.tsv"));
}
