use std::path::PathBuf;

use cohort_split::{SplitManifest, SplitPaths};
use cohort_transform::ValueCount;

#[derive(Debug, Clone)]
pub struct ExclusionsResult {
    pub excluded: usize,
    pub output: PathBuf,
}

/// Outcome of a covariate or phenotype extraction.
#[derive(Debug, Clone)]
pub struct TableResult {
    pub label: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub counts: Vec<ValueCount>,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SplitResult {
    pub excluded: usize,
    pub manifest: SplitManifest,
    pub paths: SplitPaths,
}
