//! Pipeline steps behind each subcommand.
//!
//! Every step reads its inputs from disk, runs the library operation, and
//! writes its output file, returning what the summary tables need.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use cohort_ingest::{
    FrameSource, read_exclusion_set, read_tsv_table, write_id_list, write_tsv_table,
};
use cohort_model::ExclusionSet;
use cohort_split::{
    CohortOptions, SplitManifest, SplitProportions, assemble_cohort, split_cohort, write_splits,
};
use cohort_transform::{
    CovariateFields, QualityControlFields, build_exclusion_set, default_registry,
    extract_covariates, extract_with_spec,
};

use crate::types::{ExclusionsResult, SplitResult, TableResult};

/// Inputs for the split step; proportions are validated before any file is read.
#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub phenotypes: PathBuf,
    pub covariates: PathBuf,
    pub exclusions: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub prefix: String,
    pub proportions: SplitProportions,
    pub seed: u64,
    pub options: CohortOptions,
}

pub fn exclusions(dataset: &Path, output: &Path) -> Result<ExclusionsResult> {
    let span = info_span!("exclusions", dataset = %dataset.display());
    let _guard = span.enter();

    let source = load_dataset(dataset)?;
    let excluded = build_exclusion_set(&source, &QualityControlFields::default())
        .context("derive exclusion set")?;
    write_id_list(output, excluded.iter())
        .with_context(|| format!("write {}", output.display()))?;
    info!(excluded = excluded.len(), output = %output.display(), "exclusion list written");
    Ok(ExclusionsResult {
        excluded: excluded.len(),
        output: output.to_path_buf(),
    })
}

pub fn covariates(
    dataset: &Path,
    exclusions: Option<&Path>,
    output: &Path,
) -> Result<TableResult> {
    let span = info_span!("covariates", dataset = %dataset.display());
    let _guard = span.enter();

    let source = load_dataset(dataset)?;
    let excluded = load_exclusions(exclusions)?;
    let mut df = extract_covariates(&source, &CovariateFields::default(), excluded.as_ref())
        .context("extract covariates")?;
    write_table(output, &mut df)?;
    Ok(TableResult {
        label: "covariates".to_string(),
        rows: df.height(),
        columns: column_names(&df),
        counts: Vec::new(),
        output: output.to_path_buf(),
    })
}

pub fn phenotype(
    dataset: &Path,
    name: &str,
    exclusions: Option<&Path>,
    output: Option<&Path>,
) -> Result<TableResult> {
    let spec = default_registry().get(name)?;
    let span = info_span!("phenotype", phenotype = spec.name());
    let _guard = span.enter();

    let output = output.map_or_else(
        || PathBuf::from(format!("{}.tsv", spec.name())),
        Path::to_path_buf,
    );
    let source = load_dataset(dataset)?;
    let excluded = load_exclusions(exclusions)?;
    let mut frame = extract_with_spec(spec, &source, excluded.as_ref())
        .with_context(|| format!("derive phenotype {}", spec.name()))?;
    write_table(&output, &mut frame.data)?;
    Ok(TableResult {
        label: spec.name().to_string(),
        rows: frame.data.height(),
        columns: column_names(&frame.data),
        counts: frame.counts,
        output,
    })
}

pub fn splits(request: &SplitRequest) -> Result<SplitResult> {
    let span = info_span!("splits", prefix = %request.prefix);
    let _guard = span.enter();

    let phenotypes = read_tsv_table(&request.phenotypes)
        .with_context(|| format!("read phenotypes {}", request.phenotypes.display()))?;
    let covariates = read_tsv_table(&request.covariates)
        .with_context(|| format!("read covariates {}", request.covariates.display()))?;
    let excluded = load_exclusions(request.exclusions.as_deref())?.unwrap_or_default();

    let cohort = assemble_cohort(&phenotypes, &covariates, &excluded, &request.options)
        .context("assemble cohort")?;
    let assignment = split_cohort(cohort, request.proportions, request.seed);
    let manifest = SplitManifest::new(&assignment, request.proportions, request.seed);
    let paths = write_splits(&request.output_dir, &request.prefix, &assignment, &manifest)
        .context("write split files")?;
    Ok(SplitResult {
        excluded: excluded.len(),
        manifest,
        paths,
    })
}

fn load_dataset(path: &Path) -> Result<FrameSource> {
    FrameSource::from_tsv(path).with_context(|| format!("load dataset {}", path.display()))
}

fn load_exclusions(path: Option<&Path>) -> Result<Option<ExclusionSet>> {
    path.map(|path| {
        read_exclusion_set(path).with_context(|| format!("read exclusions {}", path.display()))
    })
    .transpose()
}

fn write_table(path: &Path, df: &mut DataFrame) -> Result<()> {
    write_tsv_table(path, df).with_context(|| format!("write {}", path.display()))
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}
