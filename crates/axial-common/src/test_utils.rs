//! Test utilities and shared fixtures.
//!
//! Enabled for this crate's own tests and, through the `testing` feature,
//! for the other workspace crates' tests.

use crate::types::{HospitalId, Measurement, PatientContext, Sex};
use chrono::NaiveDate;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Builds a date, panicking on impossible input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Patient born 2015-01-01 with the given sex.
pub fn patient(sex: Sex) -> PatientContext {
    PatientContext::new(
        HospitalId::new("H-0001").expect("valid fixture id"),
        date(2015, 1, 1),
        sex,
    )
}

/// Two right-eye readings, a year apart.
pub fn right_eye_series() -> Vec<Measurement> {
    vec![
        Measurement::new(date(2020, 1, 1), 22.5),
        Measurement::new(date(2021, 1, 1), 23.0),
    ]
}

/// Three left-eye readings with steady elongation.
pub fn left_eye_series() -> Vec<Measurement> {
    vec![
        Measurement::new(date(2020, 1, 1), 22.4),
        Measurement::new(date(2020, 7, 1), 22.7),
        Measurement::new(date(2021, 1, 1), 22.9),
    ]
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(any(test, feature = "tempfile"))]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}
