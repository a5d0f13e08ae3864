//! Domain types for patients and their biometry readings.

use crate::error::{AxialError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A patient or study identifier, used only as a chart label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HospitalId(String);

impl HospitalId {
    /// Creates an identifier, rejecting empty or whitespace-only input.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(AxialError::missing_field("hospital_id"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HospitalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HospitalId {
    type Error = AxialError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<HospitalId> for String {
    fn from(id: HospitalId) -> Self {
        id.0
    }
}

/// Sex of the patient; selects the reference dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male reference curves.
    Male,
    /// Female reference curves.
    Female,
}

impl Sex {
    /// Plural noun used in chart titles.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Male => "Males",
            Self::Female => "Females",
        }
    }
}

/// Accepts `male` or `female` in any case, ignoring surrounding
/// whitespace, so `" Male "` parses.
impl FromStr for Sex {
    type Err = AxialError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(AxialError::invalid_sex()),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("male"),
            Self::Female => f.write_str("female"),
        }
    }
}

/// Which eye a reading belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eye {
    /// Right eye (OD).
    Right,
    /// Left eye (OS).
    Left,
}

impl fmt::Display for Eye {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Right => f.write_str("Right Eye"),
            Self::Left => f.write_str("Left Eye"),
        }
    }
}

/// A single axial length reading for one eye.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Date the reading was taken.
    pub date: NaiveDate,
    /// Axial length in millimetres.
    pub axial_length_mm: f64,
}

impl Measurement {
    /// Creates a reading.
    pub const fn new(date: NaiveDate, axial_length_mm: f64) -> Self {
        Self {
            date,
            axial_length_mm,
        }
    }
}

/// Who the chart is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientContext {
    /// Display label for the patient's series.
    pub hospital_id: HospitalId,
    /// Date of birth; ages are measured from here.
    pub date_of_birth: NaiveDate,
    /// Selects the reference dataset.
    pub sex: Sex,
}

impl PatientContext {
    /// Creates a patient context.
    pub const fn new(hospital_id: HospitalId, date_of_birth: NaiveDate, sex: Sex) -> Self {
        Self {
            hospital_id,
            date_of_birth,
            sex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parsing_is_case_insensitive() {
        assert_eq!("male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("Male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!(" FEMALE ".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!(" male ".parse::<Sex>().unwrap(), Sex::Male);
    }

    #[test]
    fn test_unknown_sex_is_a_validation_error() {
        for input in ["", "m", "other", "males"] {
            let err = input.parse::<Sex>().unwrap_err();
            assert_eq!(err.user_message(), "Invalid sex entered.");
        }
    }

    #[test]
    fn test_hospital_id_rejects_blank() {
        assert!(HospitalId::new("").is_err());
        assert!(HospitalId::new("   ").is_err());
        assert_eq!(HospitalId::new(" H-001 ").unwrap().as_str(), "H-001");
    }

    #[test]
    fn test_hospital_id_serde() {
        let id: HospitalId = serde_json::from_str("\"H-42\"").unwrap();
        assert_eq!(id.to_string(), "H-42");
        assert!(serde_json::from_str::<HospitalId>("\"\"").is_err());
    }

    #[test]
    fn test_eye_display() {
        assert_eq!(Eye::Right.to_string(), "Right Eye");
        assert_eq!(Eye::Left.to_string(), "Left Eye");
    }

    #[test]
    fn test_sex_plural() {
        assert_eq!(Sex::Male.plural(), "Males");
        assert_eq!(Sex::Female.plural(), "Females");
    }
}
