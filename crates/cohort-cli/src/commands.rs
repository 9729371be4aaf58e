use anyhow::Result;
use comfy_table::Table;

use cohort_cli::pipeline::{self, SplitRequest};
use cohort_cli::types::{ExclusionsResult, SplitResult, TableResult};
use cohort_split::{CohortOptions, SplitProportions};
use cohort_transform::default_registry;

use crate::cli::{CovariatesArgs, ExclusionsArgs, PhenotypeArgs, SplitsArgs};
use crate::summary::apply_table_style;

pub fn run_exclusions(args: &ExclusionsArgs) -> Result<ExclusionsResult> {
    pipeline::exclusions(&args.dataset, &args.output)
}

pub fn run_covariates(args: &CovariatesArgs) -> Result<TableResult> {
    pipeline::covariates(&args.dataset, args.excluded.as_deref(), &args.output)
}

pub fn run_phenotype(args: &PhenotypeArgs) -> Result<TableResult> {
    pipeline::phenotype(
        &args.dataset,
        &args.phenotype,
        args.excluded.as_deref(),
        args.output.as_deref(),
    )
}

pub fn run_splits(args: &SplitsArgs) -> Result<SplitResult> {
    // Reject bad fractions before touching any file.
    let proportions = SplitProportions::new(args.train, args.val)?;
    let request = SplitRequest {
        phenotypes: args.pheno.clone(),
        covariates: args.covar.clone(),
        exclusions: args.excluded.clone(),
        output_dir: args.output_dir.clone(),
        prefix: args.out.clone(),
        proportions,
        seed: args.seed,
        options: CohortOptions {
            allow_missing_covariates: args.allow_missing_covar,
            allow_missing_phenotypes: args.allow_missing_pheno,
        },
    };
    pipeline::splits(&request)
}

pub fn run_phenotypes() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Phenotype", "Fields", "Description"]);
    apply_table_style(&mut table);
    for spec in default_registry().specs() {
        let fields = spec
            .fields()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            spec.name().to_string(),
            fields,
            spec.description().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
