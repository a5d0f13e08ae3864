//! Integration tests for axial-charts crate.
//!
//! These run the whole path from raw form fields to PNG bytes or a user
//! message, using the built-in reference tables.

use axial_charts::{
    age, generate_chart, ChartOutcome, ChartRenderer, ChartRequest, PercentileChartRenderer,
    ReferenceSet,
};
use axial_common::test_utils::{create_temp_dir, init_test_logging};
use axial_config::Config;
use std::fs;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

fn renderer() -> PercentileChartRenderer {
    PercentileChartRenderer::with_builtin_references().expect("built-in tables load")
}

fn base_request(sex: &str) -> ChartRequest {
    ChartRequest {
        hospital_id: "H-0001".to_string(),
        dob: "2015-01-01".to_string(),
        sex: sex.to_string(),
        ..ChartRequest::default()
    }
}

fn expect_png(outcome: &ChartOutcome) -> &[u8] {
    match outcome {
        ChartOutcome::Rendered(chart) => chart.png(),
        ChartOutcome::Failed(message) => panic!("expected an image, got: {message}"),
    }
}

#[test]
fn test_reference_curves_only() {
    init_test_logging();

    let outcome = generate_chart(&base_request("female"), &renderer());
    let png = expect_png(&outcome);

    assert!(png.starts_with(PNG_SIGNATURE));
    assert!(outcome.error().is_none());
}

#[test]
fn test_right_eye_only() {
    init_test_logging();

    let mut request = base_request("male");
    request.measurement_dates_right = strings(&["2020-01-01", "2021-01-01"]);
    request.axial_lengths_right = strings(&["22.5", "23.0"]);

    let outcome = generate_chart(&request, &renderer());
    assert!(expect_png(&outcome).starts_with(PNG_SIGNATURE));
}

#[test]
fn test_both_eyes_and_sex_case_insensitive() {
    let mut request = base_request("FeMaLe");
    request.measurement_dates_right = strings(&["2020-01-01"]);
    request.axial_lengths_right = strings(&["22.1"]);
    request.measurement_dates_left = strings(&["2020-01-01", "2020-06-01", "2021-01-01"]);
    request.axial_lengths_left = strings(&["22.0", "22.2", "22.4"]);

    let outcome = generate_chart(&request, &renderer());
    assert!(outcome.is_rendered());
}

#[test]
fn test_same_input_same_image() {
    let mut request = base_request("male");
    request.measurement_dates_left = strings(&["2019-03-01", "2020-03-01"]);
    request.axial_lengths_left = strings(&["22.0", "22.6"]);

    let r = renderer();
    let first = generate_chart(&request, &r);
    let second = generate_chart(&request, &r);

    assert_eq!(expect_png(&first), expect_png(&second));
}

#[test]
fn test_invalid_sex_message() {
    let mut request = base_request("other");
    request.measurement_dates_right = strings(&["2020-01-01"]);
    request.axial_lengths_right = strings(&["22.5"]);

    let outcome = generate_chart(&request, &renderer());
    assert!(outcome.image().is_none());
    assert_eq!(outcome.error(), Some("Invalid sex entered."));
}

#[test]
fn test_missing_field_message() {
    let mut request = base_request("male");
    request.hospital_id = String::new();

    let outcome = generate_chart(&request, &renderer());
    assert_eq!(outcome.error(), Some("Please fill out all required fields."));
}

#[test]
fn test_unparseable_length_message() {
    let mut request = base_request("male");
    request.measurement_dates_right = strings(&["2020-01-01"]);
    request.axial_lengths_right = strings(&["abc"]);

    let outcome = generate_chart(&request, &renderer());
    let message = outcome.error().expect("error message");
    assert!(message.starts_with("An error occurred: "), "{message}");
    assert!(message.contains("abc"));
}

#[test]
fn test_mismatched_lists_rejected() {
    let mut request = base_request("male");
    request.measurement_dates_right = strings(&["2020-01-01", "2021-01-01"]);
    request.axial_lengths_right = strings(&["22.5"]);

    let outcome = generate_chart(&request, &renderer());
    let message = outcome.error().expect("error message");
    assert!(message.contains("Right Eye has 2 measurement dates but 1 axial lengths"));
}

#[test]
fn test_measurement_before_birth_rejected() {
    let mut request = base_request("male");
    request.measurement_dates_right = strings(&["2014-06-01"]);
    request.axial_lengths_right = strings(&["21.0"]);

    let outcome = generate_chart(&request, &renderer());
    assert!(outcome.error().is_some_and(|m| m.contains("precedes date of birth")));
}

#[test]
fn test_age_examples() {
    let five = age("2015-01-01", "2020-01-01").unwrap();
    assert!((five - 5.0).abs() < 0.01);

    let half = age("2015-01-01", "2015-07-02").unwrap();
    assert!((half - 0.4983).abs() < 0.001);

    assert!(age("2015-01-01", "2015-01-01").unwrap().abs() < f64::EPSILON);
}

#[test]
fn test_custom_reference_tables_from_config() {
    let dir = create_temp_dir();
    let male = dir.path().join("males.csv");
    let female = dir.path().join("females.csv");
    fs::write(&male, "Age,3,50,97\n5,21.0,22.0,23.0\n10,22.5,23.5,24.5\n").unwrap();
    fs::write(&female, "Age,3,50,97\n5,20.6,21.6,22.6\n10,22.0,23.0,24.0\n").unwrap();

    let mut config = Config::default();
    config.reference.male_table = Some(male.clone());
    config.reference.female_table = Some(female.clone());

    let r = PercentileChartRenderer::from_config(&config).unwrap();
    let plan = r
        .plan(
            &axial_common::test_utils::patient(axial_common::Sex::Male),
            &[],
            &[],
        )
        .unwrap();
    let labels: Vec<&str> = plan.reference_curves().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["3rd Percentile", "50th Percentile", "97th Percentile"]);

    let set = ReferenceSet::from_paths(&male, &female).unwrap();
    assert_eq!(set.reference_for(" Female ").unwrap().rows().len(), 2);

    let outcome = generate_chart(&base_request("male"), &r);
    assert!(outcome.is_rendered());
}

#[test]
fn test_renderer_is_object_safe() {
    let boxed: Box<dyn ChartRenderer> = Box::new(renderer());
    assert_eq!(boxed.name(), "percentile");

    let outcome = generate_chart(&base_request("male"), boxed.as_ref());
    assert!(outcome.is_rendered());
}

#[test]
fn test_extreme_lengths_fail_instead_of_hanging() {
    for lengths in [&["1e308", "-1e308"][..], &["1.7e308"][..]] {
        let mut request = base_request("male");
        request.measurement_dates_right = strings(&["2020-01-01", "2021-01-01"][..lengths.len()]);
        request.axial_lengths_right = strings(lengths);

        let outcome = generate_chart(&request, &renderer());
        assert!(outcome.image().is_none());
        let message = outcome.error().expect("error message");
        assert!(message.starts_with("An error occurred: "), "{message}");
    }
}
