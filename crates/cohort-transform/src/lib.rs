//! Cohort derivations for biobank participant tables.
//!
//! # Overview
//!
//! This crate provides:
//! - **Exclusion sets**: derive excluded samples from genotyping quality-control fields
//! - **Exclusion filtering**: remove excluded samples from any participant table
//! - **Phenotypes**: per-phenotype derivations behind the [`PhenotypeSpec`] trait
//! - **Covariates**: ancestry, principal components, sex, and age for association models
//!
//! # Example
//!
//! ```ignore
//! use cohort_transform::{QualityControlFields, build_exclusion_set, extract_phenotype};
//!
//! let excluded = build_exclusion_set(&source, &QualityControlFields::default())?;
//! let ldl = extract_phenotype("ldl", &source, Some(&excluded))?;
//! ```

mod covariates;
mod error;
mod exclusion;
mod frame;

pub mod phenotype;

pub use covariates::{CovariateFields, extract_covariates};
pub use error::{Result, TransformError};
pub use exclusion::{
    QualityControlFields, apply_exclusions, build_exclusion_set, exclusion_set_from_frame,
};
pub use frame::{drop_incomplete_rows, field_columns, filter_rows, rename_column};
pub use phenotype::{
    LdlConfig, LdlPhenotype, PhenotypeFrame, PhenotypeRegistry, PhenotypeSpec, ValueCount,
    default_registry, extract_phenotype, extract_with_spec,
};
