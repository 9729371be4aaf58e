//! CLI argument definitions for the cohort curation tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cohort_split::{DEFAULT_SEED, DEFAULT_TRAIN_FRACTION, DEFAULT_VAL_FRACTION};

#[derive(Parser)]
#[command(
    name = "cohort",
    version,
    about = "Biobank cohort curation - exclusions, phenotypes, covariates, and splits",
    long_about = "Prepare analysis cohorts from a biobank participant table.\n\n\
                  Derives genotyping-QC exclusion lists, phenotype and covariate tables,\n\
                  and reproducible train/validation/test splits."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive the genotyping-QC exclusion list.
    Exclusions(ExclusionsArgs),

    /// Extract ancestry, principal-component, sex, and age covariates.
    Covariates(CovariatesArgs),

    /// Derive a phenotype table.
    Phenotype(PhenotypeArgs),

    /// Assemble the cohort and write train/validation/test splits.
    Splits(SplitsArgs),

    /// List supported phenotypes.
    Phenotypes,
}

#[derive(Parser)]
pub struct ExclusionsArgs {
    /// Participant table (tab-delimited, `eid` plus `p<field>...` columns).
    #[arg(long = "dataset", value_name = "TSV")]
    pub dataset: PathBuf,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "excluded_samples.tsv"
    )]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct CovariatesArgs {
    /// Participant table (tab-delimited, `eid` plus `p<field>...` columns).
    #[arg(long = "dataset", value_name = "TSV")]
    pub dataset: PathBuf,

    /// Exclusion list to apply before writing.
    #[arg(short = 'e', long = "excluded", value_name = "PATH")]
    pub excluded: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        default_value = "covariates.tsv"
    )]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct PhenotypeArgs {
    /// Participant table (tab-delimited, `eid` plus `p<field>...` columns).
    #[arg(long = "dataset", value_name = "TSV")]
    pub dataset: PathBuf,

    /// Phenotype name (see `cohort phenotypes`).
    #[arg(short = 'p', long = "phenotype", value_name = "NAME")]
    pub phenotype: String,

    /// Exclusion list to apply before deriving.
    #[arg(short = 'e', long = "excluded", value_name = "PATH")]
    pub excluded: Option<PathBuf>,

    /// Output table (default: <NAME>.tsv).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SplitsArgs {
    /// Phenotype table with an `s` column.
    #[arg(short = 'p', long = "pheno", value_name = "TSV")]
    pub pheno: PathBuf,

    /// Covariate table with an `s` column.
    #[arg(short = 'c', long = "covar", value_name = "TSV")]
    pub covar: PathBuf,

    /// Exclusion list to apply to both tables.
    #[arg(short = 'e', long = "excluded", value_name = "PATH")]
    pub excluded: Option<PathBuf>,

    /// File name prefix for `<PREFIX>_train.tsv`, `_val.tsv`, `_test.tsv`.
    #[arg(short = 'o', long = "out", value_name = "PREFIX")]
    pub out: String,

    #[arg(short = 'd', long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Training fraction.
    #[arg(short = 't', long = "train", default_value_t = DEFAULT_TRAIN_FRACTION)]
    pub train: f64,

    /// Validation fraction; the test set takes the remainder.
    #[arg(long = "val", default_value_t = DEFAULT_VAL_FRACTION)]
    pub val: f64,

    /// Shuffle seed.
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Keep participants with missing covariate values.
    #[arg(long = "allow-missing-covar")]
    pub allow_missing_covar: bool,

    /// Keep participants with missing phenotype values.
    #[arg(long = "allow-missing-pheno")]
    pub allow_missing_pheno: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
