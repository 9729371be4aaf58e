//! Participant data access for cohort curation.
//!
//! This crate provides the boundary to the biobank participant table and the
//! file formats exchanged between pipeline steps.
//!
//! # Features
//!
//! - **Data sources**: the [`DataSource`] trait and the table-backed [`FrameSource`]
//! - **Field resolution**: field identifiers to `p<field>_i<instance>_a<array>` columns
//! - **TSV tables**: header-row tables read into and written from Polars DataFrames
//! - **Identifier lists**: headerless single-column participant lists
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cohort_ingest::{FrameSource, retrieve_fields};
//! use cohort_model::FieldId;
//!
//! let source = FrameSource::from_tsv(Path::new("participants.tsv"))?;
//! let df = retrieve_fields(&[FieldId::new(30780)], &source)?;
//! ```

mod error;
mod id_list;
mod polars_utils;
mod resolver;
mod source;
mod tsv;

// === Error Types ===
pub use error::{IngestError, Result};

// === Data Sources ===
pub use source::{DataSource, FrameSource};

// === Field Resolution ===
pub use resolver::{field_pattern, resolve_field_names, retrieve_fields};

// === File Formats ===
pub use id_list::{read_exclusion_set, read_id_list, write_id_list};
pub use tsv::{read_tsv_table, write_tsv_table};

// === Cell Helpers ===
pub use polars_utils::{
    any_to_f64, any_to_participant_id, any_to_string, f64_values, format_numeric, is_missing,
    parse_f64, participant_ids, string_values,
};
