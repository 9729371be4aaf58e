//! CLI library components for cohort curation.

pub mod logging;
pub mod pipeline;
pub mod types;
