//! Polars AnyValue utility functions.
//!
//! Helpers for reading cells out of participant tables without caring whether
//! the TSV reader inferred a column as integer, float, or string.

use polars::prelude::{AnyValue, Column, DataFrame};

use cohort_model::ParticipantId;

use crate::error::Result;

/// Converts a Polars AnyValue to a String representation.
/// Returns None for Null.
pub fn any_to_string(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(v.to_string()),
        AnyValue::Int16(v) => Some(v.to_string()),
        AnyValue::Int32(v) => Some(v.to_string()),
        AnyValue::Int64(v) => Some(v.to_string()),
        AnyValue::UInt8(v) => Some(v.to_string()),
        AnyValue::UInt16(v) => Some(v.to_string()),
        AnyValue::UInt32(v) => Some(v.to_string()),
        AnyValue::UInt64(v) => Some(v.to_string()),
        AnyValue::Float32(v) => Some(format_numeric(f64::from(v))),
        AnyValue::Float64(v) => Some(format_numeric(v)),
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        AnyValue::Boolean(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Converts an AnyValue to f64, returning None for non-numeric or null values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Converts an AnyValue to a participant identifier.
pub fn any_to_participant_id(value: AnyValue<'_>) -> Option<ParticipantId> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(ParticipantId::new(i64::from(v))),
        AnyValue::Int16(v) => Some(ParticipantId::new(i64::from(v))),
        AnyValue::Int32(v) => Some(ParticipantId::new(i64::from(v))),
        AnyValue::Int64(v) => Some(ParticipantId::new(v)),
        AnyValue::UInt8(v) => Some(ParticipantId::new(i64::from(v))),
        AnyValue::UInt16(v) => Some(ParticipantId::new(i64::from(v))),
        AnyValue::UInt32(v) => Some(ParticipantId::new(i64::from(v))),
        AnyValue::UInt64(v) => i64::try_from(v).ok().map(ParticipantId::new),
        AnyValue::Float32(v) => format_numeric(f64::from(v)).parse().ok(),
        AnyValue::Float64(v) => format_numeric(v).parse().ok(),
        AnyValue::String(s) => s.parse().ok(),
        AnyValue::StringOwned(s) => s.parse().ok(),
        _ => None,
    }
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Returns true when the column holds no value at `idx` (null or NaN).
pub fn is_missing(column: &Column, idx: usize) -> bool {
    match column.get(idx) {
        Ok(AnyValue::Null) | Err(_) => true,
        Ok(AnyValue::Float64(v)) => v.is_nan(),
        Ok(AnyValue::Float32(v)) => v.is_nan(),
        Ok(_) => false,
    }
}

/// Reads a column as optional strings (one entry per row).
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_string(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Reads a column as optional floats (one entry per row).
pub fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}

/// Reads a column as optional participant identifiers (one entry per row).
pub fn participant_ids(df: &DataFrame, name: &str) -> Result<Vec<Option<ParticipantId>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        values.push(any_to_participant_id(
            column.get(idx).unwrap_or(AnyValue::Null),
        ));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_numeric_strips_trailing_zeros() {
        assert_eq!(format_numeric(5.0), "5");
        assert_eq!(format_numeric(3.25), "3.25");
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn participant_ids_from_mixed_values() {
        assert_eq!(
            any_to_participant_id(AnyValue::Int64(7)),
            Some(ParticipantId::new(7))
        );
        assert_eq!(
            any_to_participant_id(AnyValue::Float64(8.0)),
            Some(ParticipantId::new(8))
        );
        assert_eq!(
            any_to_participant_id(AnyValue::String(" 9 ")),
            Some(ParticipantId::new(9))
        );
        assert_eq!(any_to_participant_id(AnyValue::Null), None);
        assert_eq!(any_to_participant_id(AnyValue::String("x")), None);
    }

    #[test]
    fn any_to_f64_parses_strings() {
        assert_eq!(any_to_f64(AnyValue::String("3.5")), Some(3.5));
        assert_eq!(any_to_f64(AnyValue::String("")), None);
        assert_eq!(any_to_f64(AnyValue::Int32(2)), Some(2.0));
    }
}
