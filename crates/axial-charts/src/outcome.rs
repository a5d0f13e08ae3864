//! Chart results as handed back to a front end.

use crate::renderer::ChartRenderer;
use crate::request::ChartRequest;
use axial_common::Result;
use base64::Engine as _;
use tracing::{error, warn};

/// A rendered PNG held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl RenderedChart {
    /// Wraps encoded PNG bytes.
    pub const fn new(png: Vec<u8>, width: u32, height: u32) -> Self {
        Self { png, width, height }
    }

    /// The PNG bytes.
    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Image width in pixels.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Standard base64 text of the PNG, for embedding in a page.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.png)
    }

    /// `data:image/png;base64,...` URI for an `<img src>`.
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.to_base64())
    }
}

/// Either an image or a message for the user; never both, never neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    /// The chart rendered.
    Rendered(RenderedChart),
    /// Something went wrong; the text is safe to show to the user.
    Failed(String),
}

impl ChartOutcome {
    /// The image, when rendering succeeded.
    pub const fn image(&self) -> Option<&RenderedChart> {
        match self {
            Self::Rendered(chart) => Some(chart),
            Self::Failed(_) => None,
        }
    }

    /// The user-facing message, when it failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rendered(_) => None,
            Self::Failed(message) => Some(message),
        }
    }

    /// Whether an image was produced.
    pub const fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }

    /// Splits into the `(image, error)` pair a template expects.
    pub fn into_parts(self) -> (Option<RenderedChart>, Option<String>) {
        match self {
            Self::Rendered(chart) => (Some(chart), None),
            Self::Failed(message) => (None, Some(message)),
        }
    }
}

impl From<Result<RenderedChart>> for ChartOutcome {
    fn from(result: Result<RenderedChart>) -> Self {
        match result {
            Ok(chart) => Self::Rendered(chart),
            Err(err) => {
                if err.is_user_input() {
                    warn!(error = %err, "Rejected chart request");
                } else {
                    error!(error = %err, "Chart generation failed");
                }
                Self::Failed(err.user_message())
            }
        }
    }
}

/// Validates raw form input and renders it, converting every failure into a
/// user-facing message.
pub fn generate_chart<R>(request: &ChartRequest, renderer: &R) -> ChartOutcome
where
    R: ChartRenderer + ?Sized,
{
    request
        .validate()
        .and_then(|valid| renderer.render(&valid.patient, &valid.right, &valid.left))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axial_common::{AxialError, Measurement, PatientContext};

    struct FailingRenderer;

    impl ChartRenderer for FailingRenderer {
        fn render(
            &self,
            _patient: &PatientContext,
            _right: &[Measurement],
            _left: &[Measurement],
        ) -> Result<RenderedChart> {
            Err(AxialError::rendering("backend unavailable"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct StubRenderer;

    impl ChartRenderer for StubRenderer {
        fn render(
            &self,
            _patient: &PatientContext,
            right: &[Measurement],
            left: &[Measurement],
        ) -> Result<RenderedChart> {
            let count = u8::try_from(right.len() + left.len()).unwrap_or(u8::MAX);
            Ok(RenderedChart::new(vec![count], 1, 1))
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn request() -> ChartRequest {
        ChartRequest {
            hospital_id: "H-7".to_string(),
            dob: "2015-01-01".to_string(),
            sex: "female".to_string(),
            measurement_dates_left: vec!["2020-01-01".to_string()],
            axial_lengths_left: vec!["22.1".to_string()],
            ..ChartRequest::default()
        }
    }

    #[test]
    fn test_base64_and_data_uri() {
        let chart = RenderedChart::new(b"\x89PNG".to_vec(), 1, 1);
        assert_eq!(chart.to_base64(), "iVBORw==");
        assert_eq!(chart.data_uri(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_exactly_one_side_populated() {
        let ok = ChartOutcome::Rendered(RenderedChart::new(vec![1], 1, 1));
        assert!(ok.image().is_some() && ok.error().is_none());

        let failed = ChartOutcome::Failed("nope".to_string());
        assert!(failed.image().is_none() && failed.error() == Some("nope"));

        let (image, error) = failed.into_parts();
        assert!(image.is_none());
        assert_eq!(error.as_deref(), Some("nope"));
    }

    #[test]
    fn test_generate_chart_passes_validated_input() {
        let outcome = generate_chart(&request(), &StubRenderer);
        assert_eq!(outcome.image().unwrap().png(), &[1u8]);
    }

    #[test]
    fn test_rendering_failure_becomes_generic_message() {
        let outcome = generate_chart(&request(), &FailingRenderer);
        assert_eq!(
            outcome.error(),
            Some("An error occurred: Rendering error: backend unavailable")
        );
    }

    #[test]
    fn test_validation_failure_skips_renderer() {
        let mut req = request();
        req.sex = "x".to_string();
        let outcome = generate_chart(&req, &FailingRenderer);
        assert_eq!(outcome.error(), Some("Invalid sex entered."));
    }
}
