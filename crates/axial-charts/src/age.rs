//! Age at measurement, in fractional years.
//!
//! Ages use a fixed 365.25-day year. The built-in reference tables express
//! their `Age` column in the same unit, so patient points and reference
//! curves share one axis.

use axial_common::{AxialError, Result};
use chrono::NaiveDate;

/// Days in one year of age.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Accepted date format, as submitted by HTML date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date, ignoring surrounding whitespace.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AxialError::invalid_date(
            format!("'{}' is not a date in YYYY-MM-DD form", value.trim()),
            value,
        )
    })
}

/// Elapsed years between birth and measurement.
///
/// A measurement on the date of birth is age 0. A measurement before the
/// date of birth is rejected rather than clamped.
pub fn age_in_years(date_of_birth: NaiveDate, measured_on: NaiveDate) -> Result<f64> {
    if measured_on < date_of_birth {
        return Err(AxialError::invalid_date(
            format!("measurement date {measured_on} precedes date of birth {date_of_birth}"),
            measured_on.to_string(),
        ));
    }

    #[allow(clippy::cast_precision_loss)]
    let days = (measured_on - date_of_birth).num_days() as f64;
    Ok(days / DAYS_PER_YEAR)
}

/// Parses both dates and returns the age at measurement.
pub fn age(date_of_birth: &str, measurement_date: &str) -> Result<f64> {
    age_in_years(parse_date(date_of_birth)?, parse_date(measurement_date)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axial_common::test_utils::{assert_approx_eq, date};
    use proptest::prelude::*;

    #[test]
    fn test_same_day_is_zero() {
        assert_eq!(age("2015-01-01", "2015-01-01").unwrap(), 0.0);
    }

    #[test]
    fn test_five_years() {
        // 2015-01-01 to 2020-01-01 spans 1826 days (one leap day).
        assert_approx_eq(age("2015-01-01", "2020-01-01").unwrap(), 1826.0 / 365.25, 1e-12);
        assert_approx_eq(age("2015-01-01", "2020-01-01").unwrap(), 5.0, 0.01);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(parse_date(" 2021-06-30 ").unwrap(), date(2021, 6, 30));
    }

    #[test]
    fn test_unparseable_dates() {
        for bad in ["", "2020/01/01", "01-01-2020", "2020-02-30", "yesterday"] {
            let err = parse_date(bad).unwrap_err();
            assert!(matches!(err, AxialError::InvalidDate { .. }), "{bad}: {err}");
        }
    }

    #[test]
    fn test_measurement_before_birth_rejected() {
        let err = age_in_years(date(2015, 1, 1), date(2014, 12, 31)).unwrap_err();
        assert!(err.to_string().contains("precedes date of birth"));
        assert!(err.is_user_input());
    }

    proptest! {
        #[test]
        fn prop_age_is_monotonic(offset_a in 0i64..8000, offset_b in 0i64..8000) {
            let dob = date(2010, 3, 15);
            let a = dob + chrono::Duration::days(offset_a);
            let b = dob + chrono::Duration::days(offset_b);

            let age_a = age_in_years(dob, a).unwrap();
            let age_b = age_in_years(dob, b).unwrap();

            prop_assert!(age_a >= 0.0);
            prop_assert_eq!(offset_a.cmp(&offset_b), age_a.partial_cmp(&age_b).unwrap());
        }
    }
}
