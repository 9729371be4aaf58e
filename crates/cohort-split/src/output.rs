//! Split files and the run manifest.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use cohort_ingest::write_id_list;
use cohort_model::ParticipantId;

use crate::error::{Result, SplitError};
use crate::proportions::SplitProportions;
use crate::splitter::SplitAssignment;

/// Paths of the files written for one split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPaths {
    pub train: PathBuf,
    pub val: PathBuf,
    pub test: PathBuf,
    pub manifest: PathBuf,
}

impl SplitPaths {
    /// `<dir>/<prefix>_{train,val,test}.tsv` and `<dir>/<prefix>_splits.json`.
    pub fn new(dir: &Path, prefix: &str) -> Self {
        Self {
            train: dir.join(format!("{prefix}_train.tsv")),
            val: dir.join(format!("{prefix}_val.tsv")),
            test: dir.join(format!("{prefix}_test.tsv")),
            manifest: dir.join(format!("{prefix}_splits.json")),
        }
    }
}

/// Record of how a split was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitManifest {
    pub seed: u64,
    pub train_fraction: f64,
    pub val_fraction: f64,
    pub cohort_size: usize,
    pub train: usize,
    pub val: usize,
    pub test: usize,
    /// SHA-256 of the sorted cohort identifiers, one per line.
    pub cohort_sha256: String,
    /// RFC 3339 timestamp.
    pub generated_at: String,
}

impl SplitManifest {
    pub fn new(assignment: &SplitAssignment, proportions: SplitProportions, seed: u64) -> Self {
        let (train, val, test) = assignment.counts();
        Self {
            seed,
            train_fraction: proportions.train(),
            val_fraction: proportions.val(),
            cohort_size: assignment.len(),
            train,
            val,
            test,
            cohort_sha256: cohort_digest(&assignment.sorted_ids()),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Hex SHA-256 over `id\n` for each identifier in the given order.
pub fn cohort_digest(ids: &[ParticipantId]) -> String {
    let mut hasher = Sha256::new();
    for id in ids {
        hasher.update(id.to_string().as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

/// Writes the three headerless identifier files and the manifest.
///
/// The output directory is created if needed; existing files are overwritten.
pub fn write_splits(
    dir: &Path,
    prefix: &str,
    assignment: &SplitAssignment,
    manifest: &SplitManifest,
) -> Result<SplitPaths> {
    fs::create_dir_all(dir).map_err(|source| SplitError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let paths = SplitPaths::new(dir, prefix);

    write_id_list(&paths.train, assignment.train.iter().copied())?;
    write_id_list(&paths.val, assignment.val.iter().copied())?;
    write_id_list(&paths.test, assignment.test.iter().copied())?;
    write_manifest(&paths.manifest, manifest)?;

    info!(dir = %dir.display(), prefix, "split files written");
    Ok(paths)
}

fn write_manifest(path: &Path, manifest: &SplitManifest) -> Result<()> {
    let manifest_error = |message: String| SplitError::Manifest {
        path: path.to_path_buf(),
        message,
    };
    let json = serde_json::to_string_pretty(manifest).map_err(|e| manifest_error(e.to_string()))?;
    fs::write(path, json).map_err(|e| manifest_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_of_empty_cohort() {
        assert_eq!(
            cohort_digest(&[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn paths_follow_prefix() {
        let paths = SplitPaths::new(Path::new("out"), "ldl");
        assert_eq!(paths.train, Path::new("out/ldl_train.tsv"));
        assert_eq!(paths.manifest, Path::new("out/ldl_splits.json"));
    }
}
