//! Core types shared by the cohort curation crates.

pub mod column;
pub mod error;
pub mod exclusion;
pub mod ids;

pub use column::{ColumnName, compare_column_names, sort_column_names};
pub use error::{ModelError, Result};
pub use exclusion::ExclusionSet;
pub use ids::{FieldId, ParticipantId};

/// Participant identifier column of the biobank participant table.
pub const SOURCE_ID_COLUMN: &str = "eid";

/// Participant identifier column of every cohort file written by this workspace.
pub const COHORT_ID_COLUMN: &str = "s";
