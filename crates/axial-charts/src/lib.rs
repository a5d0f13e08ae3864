//! # Axial Charts
//!
//! Axial length percentile charts.
//!
//! Given a date of birth, a sex, and each eye's dated axial length readings,
//! this crate computes age at each reading, overlays the patient's
//! trajectories on sex-specific reference percentile curves, and returns the
//! chart as an in-memory PNG.
//!
//! ```no_run
//! use axial_charts::{generate_chart, ChartRequest, PercentileChartRenderer};
//!
//! let renderer = PercentileChartRenderer::with_builtin_references()?;
//! let request = ChartRequest {
//!     hospital_id: "H-0001".into(),
//!     dob: "2015-01-01".into(),
//!     sex: "male".into(),
//!     measurement_dates_right: vec!["2020-01-01".into()],
//!     axial_lengths_right: vec!["22.5".into()],
//!     ..ChartRequest::default()
//! };
//! let outcome = generate_chart(&request, &renderer);
//! # Ok::<(), axial_common::AxialError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod age;
pub mod outcome;
pub mod reference;
pub mod renderer;
pub mod request;
pub mod style;

pub use age::{age, age_in_years, parse_date};
pub use outcome::{generate_chart, ChartOutcome, RenderedChart};
pub use reference::{PercentileCurve, ReferenceRow, ReferenceSet, ReferenceTable};
pub use renderer::{ChartPlan, ChartRenderer, PercentileChartRenderer, PlotSeries, SeriesKind};
pub use request::{ChartRequest, ValidatedRequest};
pub use style::ChartStyle;
