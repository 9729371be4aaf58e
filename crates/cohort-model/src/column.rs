//! Participant-table column names and their version-aware ordering.
//!
//! Columns of the participant table are named `p<field>`, optionally followed
//! by `_i<instance>` (assessment visit) and `_a<array>` (repeated measurement
//! within a visit), e.g. `p30780_i0` or `p22009_a10`. Downstream code relies
//! on instance 0 preceding instance 1, so names are compared on their numeric
//! components: `p30780_i2` sorts before `p30780_i10`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{FieldId, ModelError};

/// Parsed `p<field>[_i<instance>][_a<array>]` column name.
///
/// The derived ordering compares `(field, instance, array)`; an absent
/// component sorts before any present one, so `p31 < p31_i0 < p31_i0_a0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnName {
    field: FieldId,
    instance: Option<u32>,
    array: Option<u32>,
}

impl ColumnName {
    pub const fn new(field: FieldId, instance: Option<u32>, array: Option<u32>) -> Self {
        Self {
            field,
            instance,
            array,
        }
    }

    pub fn parse(name: &str) -> Result<Self, ModelError> {
        let invalid = || ModelError::InvalidColumnName(name.to_string());
        let rest = name.strip_prefix('p').ok_or_else(invalid)?;
        let (field, mut rest) = take_digits(rest).ok_or_else(invalid)?;
        let mut instance = None;
        let mut array = None;
        if let Some(after) = rest.strip_prefix("_i") {
            let (value, tail) = take_digits(after).ok_or_else(invalid)?;
            instance = Some(value);
            rest = tail;
        }
        if let Some(after) = rest.strip_prefix("_a") {
            let (value, tail) = take_digits(after).ok_or_else(invalid)?;
            array = Some(value);
            rest = tail;
        }
        if !rest.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            field: FieldId::new(field),
            instance,
            array,
        })
    }

    pub fn field(&self) -> FieldId {
        self.field
    }

    pub fn instance(&self) -> Option<u32> {
        self.instance
    }

    pub fn array(&self) -> Option<u32> {
        self.array
    }
}

impl FromStr for ColumnName {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.field)?;
        if let Some(instance) = self.instance {
            write!(f, "_i{instance}")?;
        }
        if let Some(array) = self.array {
            write!(f, "_a{array}")?;
        }
        Ok(())
    }
}

fn take_digits(input: &str) -> Option<(u32, &str)> {
    let end = input
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(input.len(), |(idx, _)| idx);
    if end == 0 {
        return None;
    }
    let value = input[..end].parse().ok()?;
    Some((value, &input[end..]))
}

/// Compare two column names, treating embedded digit runs as numbers.
///
/// Names that parse as [`ColumnName`] are ordered by their components (ties
/// such as `_i01` vs `_i1` fall back to the raw text). Anything else is split
/// into alternating digit and non-digit runs; digit runs compare numerically,
/// text runs lexically, and a digit run sorts before a text run.
pub fn compare_column_names(left: &str, right: &str) -> Ordering {
    match (ColumnName::parse(left), ColumnName::parse(right)) {
        (Ok(a), Ok(b)) => a.cmp(&b).then_with(|| left.cmp(right)),
        _ => natural_cmp(left, right),
    }
}

/// Sort column names in place with [`compare_column_names`].
pub fn sort_column_names(names: &mut [String]) {
    names.sort_by(|a, b| compare_column_names(a, b));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Number(&'a str),
    Text(&'a str),
}

fn segments(input: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits = None;
    for (idx, ch) in input.char_indices() {
        let digit = ch.is_ascii_digit();
        match in_digits {
            Some(current) if current != digit => {
                out.push(segment(&input[start..idx], current));
                start = idx;
                in_digits = Some(digit);
            }
            None => in_digits = Some(digit),
            _ => {}
        }
    }
    if let Some(current) = in_digits {
        out.push(segment(&input[start..], current));
    }
    out
}

fn segment(text: &str, digits: bool) -> Segment<'_> {
    if digits {
        Segment::Number(text)
    } else {
        Segment::Text(text)
    }
}

// Arbitrary-length digit runs: compare without leading zeros, then by length.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn natural_cmp(left: &str, right: &str) -> Ordering {
    let left_segments = segments(left);
    let right_segments = segments(right);
    for (a, b) in left_segments.iter().zip(right_segments.iter()) {
        let ordering = match (a, b) {
            (Segment::Number(x), Segment::Number(y)) => cmp_digit_runs(x, y),
            (Segment::Text(x), Segment::Text(y)) => x.cmp(y),
            (Segment::Number(_), Segment::Text(_)) => Ordering::Less,
            (Segment::Text(_), Segment::Number(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left_segments
        .len()
        .cmp(&right_segments.len())
        .then_with(|| left.cmp(right))
}
