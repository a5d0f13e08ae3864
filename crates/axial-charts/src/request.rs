//! Raw form input and its validation into typed chart input.

use crate::age::parse_date;
use axial_common::{AxialError, Eye, HospitalId, Measurement, PatientContext, Result, Sex};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fields exactly as a web form or command line submits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartRequest {
    /// Patient or study identifier.
    pub hospital_id: String,
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: String,
    /// `male` or `female`, any case.
    pub sex: String,
    /// Right eye measurement dates.
    pub measurement_dates_right: Vec<String>,
    /// Right eye axial lengths in mm, paired with the dates by position.
    pub axial_lengths_right: Vec<String>,
    /// Left eye measurement dates.
    pub measurement_dates_left: Vec<String>,
    /// Left eye axial lengths in mm, paired with the dates by position.
    pub axial_lengths_left: Vec<String>,
}

/// Typed input ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// Who the chart is for.
    pub patient: PatientContext,
    /// Right eye readings in submission order.
    pub right: Vec<Measurement>,
    /// Left eye readings in submission order.
    pub left: Vec<Measurement>,
}

impl ChartRequest {
    /// Checks and converts every field.
    ///
    /// Required fields are checked before anything else, then sex, then list
    /// pairing, then numbers, then dates. The first failure is returned.
    pub fn validate(&self) -> Result<ValidatedRequest> {
        let required = [
            ("hospital_id", &self.hospital_id),
            ("dob", &self.dob),
            ("sex", &self.sex),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(AxialError::missing_field(*field));
        }

        let sex: Sex = self.sex.parse()?;

        let right_pairs = pair(
            Eye::Right,
            &self.measurement_dates_right,
            &self.axial_lengths_right,
        )?;
        let left_pairs = pair(
            Eye::Left,
            &self.measurement_dates_left,
            &self.axial_lengths_left,
        )?;

        let right_lengths = parse_lengths(Eye::Right, &right_pairs)?;
        let left_lengths = parse_lengths(Eye::Left, &left_pairs)?;

        let patient = PatientContext::new(
            HospitalId::new(self.hospital_id.as_str())?,
            parse_date(&self.dob)?,
            sex,
        );
        let right = attach_dates(&right_pairs, right_lengths)?;
        let left = attach_dates(&left_pairs, left_lengths)?;

        debug!(
            %sex,
            right = right.len(),
            left = left.len(),
            "Validated chart request"
        );
        Ok(ValidatedRequest {
            patient,
            right,
            left,
        })
    }
}

fn pair<'a>(eye: Eye, dates: &'a [String], lengths: &'a [String]) -> Result<Vec<(&'a str, &'a str)>> {
    if dates.len() != lengths.len() {
        return Err(AxialError::data_consistency(
            format!(
                "{eye} has {} measurement dates but {} axial lengths",
                dates.len(),
                lengths.len()
            ),
            eye,
        ));
    }
    Ok(dates
        .iter()
        .zip(lengths)
        .map(|(d, l)| (d.as_str(), l.as_str()))
        .collect())
}

fn parse_lengths(eye: Eye, pairs: &[(&str, &str)]) -> Result<Vec<f64>> {
    pairs
        .iter()
        .map(|(_, raw)| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    AxialError::invalid_number(
                        format!("{} axial length", eye.to_string().to_lowercase()),
                        *raw,
                    )
                })
        })
        .collect()
}

fn attach_dates(pairs: &[(&str, &str)], lengths: Vec<f64>) -> Result<Vec<Measurement>> {
    pairs
        .iter()
        .zip(lengths)
        .map(|((date, _), length)| Ok(Measurement::new(parse_date(date)?, length)))
        .collect()
}
