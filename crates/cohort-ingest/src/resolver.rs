//! Field resolution: from field identifiers to concrete column names.
//!
//! A field such as `30780` is recorded once per assessment visit and, for some
//! fields, several times per visit. The participant table therefore holds
//! `p30780_i0`, `p30780_i1`, ... Resolution finds all of them and returns the
//! names in version-aware order so that instance 0 always precedes instance 1.

use polars::prelude::DataFrame;
use regex::Regex;
use tracing::{debug, info};

use cohort_model::{FieldId, SOURCE_ID_COLUMN, sort_column_names};

use crate::error::Result;
use crate::source::DataSource;

/// Pattern matching every instance/array column of `field`.
pub fn field_pattern(field: FieldId) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r"^{}(_i\d+)?(_a\d+)?$",
        field.column_prefix()
    ))?)
}

/// Resolves field identifiers to the matching column names of `source`.
///
/// Fields without any column contribute nothing. The result is de-duplicated
/// and sorted with [`cohort_model::compare_column_names`].
pub fn resolve_field_names<S>(fields: &[FieldId], source: &S) -> Result<Vec<String>>
where
    S: DataSource + ?Sized,
{
    let mut names = Vec::new();
    for field in fields {
        let matches = source.find_columns(&field_pattern(*field)?)?;
        if matches.is_empty() {
            debug!(field = %field, "field not recorded in source");
        } else {
            debug!(field = %field, columns = matches.len(), "field resolved");
        }
        names.extend(matches);
    }
    sort_column_names(&mut names);
    names.dedup();
    Ok(names)
}

/// Retrieves `eid` plus every resolved column of `fields`, one row per participant.
///
/// Source failures are returned as-is.
pub fn retrieve_fields<S>(fields: &[FieldId], source: &S) -> Result<DataFrame>
where
    S: DataSource + ?Sized,
{
    let mut columns = vec![SOURCE_ID_COLUMN.to_string()];
    columns.extend(resolve_field_names(fields, source)?);
    let df = source.retrieve(&columns)?;
    info!(
        fields = fields.len(),
        columns = columns.len(),
        participants = df.height(),
        "participant fields retrieved"
    );
    Ok(df)
}
