#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Numeric code naming a recorded concept in the biobank schema (e.g. `30780`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FieldId(u32);

impl FieldId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Column prefix used by the participant table (`p<id>`).
    pub fn column_prefix(self) -> String {
        format!("p{}", self.0)
    }
}

impl FromStr for FieldId {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('p').unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .map(Self)
            .map_err(|_| ModelError::InvalidFieldId(value.to_string()))
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Participant identifier (`eid` in the source table, `s` in cohort files).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ParticipantId(i64);

impl ParticipantId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ParticipantId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for ParticipantId {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(parsed) = trimmed.parse::<i64>() {
            return Ok(Self(parsed));
        }
        // Identifiers written by float-typed columns come back as "1234.0".
        match trimmed.parse::<f64>() {
            Ok(parsed) if parsed.fract() == 0.0 && parsed.abs() < 9.0e15 => {
                Ok(Self(parsed as i64))
            }
            _ => Err(ModelError::InvalidParticipantId(value.to_string())),
        }
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_id_accepts_prefixed_and_bare() {
        assert_eq!("30780".parse::<FieldId>().unwrap(), FieldId::new(30780));
        assert_eq!("p6153".parse::<FieldId>().unwrap(), FieldId::new(6153));
        assert!("p".parse::<FieldId>().is_err());
        assert!("ldl".parse::<FieldId>().is_err());
    }

    #[test]
    fn field_id_column_prefix() {
        assert_eq!(FieldId::new(31).column_prefix(), "p31");
    }

    #[test]
    fn participant_id_parses_integral_floats() {
        assert_eq!(
            "1000017".parse::<ParticipantId>().unwrap(),
            ParticipantId::new(1_000_017)
        );
        assert_eq!(
            " 42.0 ".parse::<ParticipantId>().unwrap(),
            ParticipantId::new(42)
        );
        assert!("42.5".parse::<ParticipantId>().is_err());
        assert!("".parse::<ParticipantId>().is_err());
    }
}
