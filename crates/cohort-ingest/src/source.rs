//! Participant data sources.
//!
//! The biobank backend is reached through the [`DataSource`] trait: it can list
//! the columns whose names match a pattern and return the requested columns as
//! one row per participant. [`FrameSource`] serves an in-memory table, usually
//! a participant-table export loaded from TSV.

use std::path::Path;

use polars::prelude::DataFrame;
use regex::Regex;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::tsv::read_tsv_table;

/// Read-only access to the participant table.
pub trait DataSource {
    /// Returns every column name matching `pattern`, in source order.
    fn find_columns(&self, pattern: &Regex) -> Result<Vec<String>>;

    /// Returns the named columns, one row per participant.
    ///
    /// # Errors
    ///
    /// Implementations report backend failures as
    /// [`IngestError::SourceUnavailable`] and unknown columns as
    /// [`IngestError::ColumnNotFound`].
    fn retrieve(&self, columns: &[String]) -> Result<DataFrame>;
}

/// Data source backed by a materialized participant table.
#[derive(Debug, Clone)]
pub struct FrameSource {
    frame: DataFrame,
}

impl FrameSource {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Loads a tab-delimited participant-table export with a header row.
    pub fn from_tsv(path: &Path) -> Result<Self> {
        let frame = read_tsv_table(path)?;
        info!(
            path = %path.display(),
            participants = frame.height(),
            columns = frame.width(),
            "participant table loaded"
        );
        Ok(Self { frame })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }
}

impl DataSource for FrameSource {
    fn find_columns(&self, pattern: &Regex) -> Result<Vec<String>> {
        Ok(self
            .frame
            .get_column_names()
            .into_iter()
            .filter(|name| pattern.is_match(name.as_str()))
            .map(|name| name.to_string())
            .collect())
    }

    fn retrieve(&self, columns: &[String]) -> Result<DataFrame> {
        for column in columns {
            if self.frame.column(column).is_err() {
                return Err(IngestError::ColumnNotFound {
                    column: column.clone(),
                });
            }
        }
        debug!(columns = columns.len(), "retrieving columns");
        Ok(self.frame.select(columns.iter().map(String::as_str))?)
    }
}
