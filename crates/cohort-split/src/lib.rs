//! Cohort assembly and reproducible train/validation/test splits.
//!
//! # Example
//!
//! ```ignore
//! use cohort_split::{CohortOptions, DEFAULT_SEED, SplitProportions, assemble_cohort, split_cohort};
//!
//! let cohort = assemble_cohort(&pheno, &covar, &excluded, &CohortOptions::default())?;
//! let splits = split_cohort(cohort, SplitProportions::new(0.8, 0.1)?, DEFAULT_SEED);
//! ```

mod cohort;
mod error;
mod output;
mod proportions;
mod splitter;

pub use cohort::{CohortOptions, assemble_cohort};
pub use error::{Result, SplitError};
pub use output::{SplitManifest, SplitPaths, cohort_digest, write_splits};
pub use proportions::{DEFAULT_TRAIN_FRACTION, DEFAULT_VAL_FRACTION, SplitProportions};
pub use splitter::{DEFAULT_SEED, SplitAssignment, split_cohort};
