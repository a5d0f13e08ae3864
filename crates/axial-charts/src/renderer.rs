//! Percentile chart composition and rasterisation.
//!
//! Rendering happens in two steps. [`PercentileChartRenderer::plan`] turns a
//! patient and their readings into a [`ChartPlan`]: title, axes, and every
//! series with its label, points, and color. [`PercentileChartRenderer::render`]
//! then draws that plan onto a bitmap owned by the call and encodes it as PNG
//! in memory. No drawing state outlives a call.

use crate::age::age_in_years;
use crate::outcome::RenderedChart;
use crate::reference::ReferenceSet;
use crate::style::ChartStyle;
use axial_common::{AxialError, Eye, Measurement, PatientContext, Result};
use axial_config::Config;
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, info};

/// Horizontal axis description.
pub const X_LABEL: &str = "Age (years)";

/// Vertical axis description.
pub const Y_LABEL: &str = "Axial Length (mm)";

/// What a series represents, which decides how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Dashed population percentile curve.
    ReferenceCurve,
    /// Solid line with markers through one eye's readings.
    Trajectory(Eye),
}

/// One labeled series on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    /// How to draw it.
    pub kind: SeriesKind,
    /// Legend text.
    pub label: String,
    /// `(age, axial length)` points in drawing order.
    pub points: Vec<(f64, f64)>,
    /// Stroke and marker color.
    pub color: RGBColor,
}

/// Everything needed to draw a chart, before any pixels exist.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    /// Chart caption.
    pub title: String,
    /// Horizontal axis description.
    pub x_label: String,
    /// Vertical axis description.
    pub y_label: String,
    /// Horizontal extent in years.
    pub x_range: Range<f64>,
    /// Vertical extent in mm.
    pub y_range: Range<f64>,
    /// Reference curves first, then right eye, then left eye.
    pub series: Vec<PlotSeries>,
}

impl ChartPlan {
    /// Series for one eye, if it had any readings.
    pub fn trajectory(&self, eye: Eye) -> Option<&PlotSeries> {
        self.series
            .iter()
            .find(|s| s.kind == SeriesKind::Trajectory(eye))
    }

    /// Reference curves in column order.
    pub fn reference_curves(&self) -> impl Iterator<Item = &PlotSeries> {
        self.series
            .iter()
            .filter(|s| s.kind == SeriesKind::ReferenceCurve)
    }
}

/// Something that can turn a patient's readings into a chart image.
pub trait ChartRenderer: Send + Sync {
    /// Renders the chart for one patient.
    fn render(
        &self,
        patient: &PatientContext,
        right: &[Measurement],
        left: &[Measurement],
    ) -> Result<RenderedChart>;

    /// Gets the name of this renderer.
    fn name(&self) -> &'static str;
}

/// Draws patient readings over sex-specific percentile curves.
#[derive(Debug, Clone)]
pub struct PercentileChartRenderer {
    references: Arc<ReferenceSet>,
    style: ChartStyle,
}

impl PercentileChartRenderer {
    /// Creates a renderer over the given tables and style.
    pub const fn new(references: Arc<ReferenceSet>, style: ChartStyle) -> Self {
        Self { references, style }
    }

    /// Built-in tables with the default style.
    pub fn with_builtin_references() -> Result<Self> {
        Ok(Self::new(ReferenceSet::builtin()?, ChartStyle::default()))
    }

    /// Tables and style from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let references = ReferenceSet::from_config(&config.reference)?;
        let style = ChartStyle::try_from(&config.chart)?;
        Ok(Self::new(references, style))
    }

    /// The style in use.
    pub const fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Lays out the chart without drawing it.
    ///
    /// Readings are kept in submission order; the trajectory line follows
    /// that order even when dates are not ascending. An eye without readings
    /// contributes no series.
    pub fn plan(
        &self,
        patient: &PatientContext,
        right: &[Measurement],
        left: &[Measurement],
    ) -> Result<ChartPlan> {
        let table = self.references.table(patient.sex);

        let mut series: Vec<PlotSeries> = table
            .curves()
            .into_iter()
            .enumerate()
            .map(|(index, curve)| PlotSeries {
                kind: SeriesKind::ReferenceCurve,
                label: curve.legend_label(),
                color: ChartStyle::percentile_color(index),
                points: curve.points,
            })
            .collect();

        for (eye, readings) in [(Eye::Right, right), (Eye::Left, left)] {
            if readings.is_empty() {
                continue;
            }
            let points = readings
                .iter()
                .map(|m| Ok((age_in_years(patient.date_of_birth, m.date)?, m.axial_length_mm)))
                .collect::<Result<Vec<_>>>()?;
            series.push(PlotSeries {
                kind: SeriesKind::Trajectory(eye),
                label: format!("{eye} {}", patient.hospital_id),
                points,
                color: match eye {
                    Eye::Right => self.style.right_eye,
                    Eye::Left => self.style.left_eye,
                },
            });
        }

        let (x_range, y_range) = padded_ranges(&series);
        ensure_drawable("age", &x_range)?;
        ensure_drawable("axial length", &y_range)?;
        Ok(ChartPlan {
            title: format!("Axial Length Percentile Curves ({})", patient.sex.plural()),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            x_range,
            y_range,
            series,
        })
    }

    /// Draws a plan into an RGB buffer of `width * height * 3` bytes.
    ///
    /// The drawing area borrows the buffer only for the duration of this
    /// call and is dropped on every return path.
    fn draw(&self, plan: &ChartPlan, buffer: &mut [u8]) -> Result<()> {
        let style = &self.style;
        let font = style.font_family.as_str();
        let label_size = i32::try_from(style.label_font_size).unwrap_or(20);

        let root = BitMapBackend::with_buffer(buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&plan.title, (font, f64::from(style.title_font_size)))
            .margin(20)
            .x_label_area_size(label_size * 3)
            .y_label_area_size(label_size * 4)
            .build_cartesian_2d(plan.x_range.clone(), plan.y_range.clone())?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(plan.x_label.as_str())
            .y_desc(plan.y_label.as_str())
            .axis_desc_style((font, f64::from(style.label_font_size)))
            .label_style((font, f64::from(style.label_font_size) * 0.75))
            .bold_line_style(BLACK.mix(0.3))
            .light_line_style(BLACK.mix(0.08));
        if !style.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        for series in &plan.series {
            let color = series.color;
            match series.kind {
                SeriesKind::ReferenceCurve => {
                    chart
                        .draw_series(DashedLineSeries::new(
                            series.points.iter().copied(),
                            10,
                            6,
                            color.stroke_width(2),
                        ))?
                        .label(series.label.as_str())
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                }
                SeriesKind::Trajectory(_) => {
                    chart.draw_series(LineSeries::new(
                        series.points.iter().copied(),
                        color.stroke_width(2),
                    ))?;
                    chart
                        .draw_series(
                            series
                                .points
                                .iter()
                                .map(|point| Circle::new(*point, 5, color.filled())),
                        )?
                        .label(series.label.as_str())
                        .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
                }
            }
        }

        if style.show_legend {
            chart
                .configure_series_labels()
                .label_font((font, f64::from(style.legend_font_size)))
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.5))
                .draw()?;
        }

        root.present()?;
        Ok(())
    }
}

impl ChartRenderer for PercentileChartRenderer {
    #[tracing::instrument(
        name = "render_percentile_chart",
        skip_all,
        fields(sex = %patient.sex, right = right.len(), left = left.len())
    )]
    fn render(
        &self,
        patient: &PatientContext,
        right: &[Measurement],
        left: &[Measurement],
    ) -> Result<RenderedChart> {
        let plan = self.plan(patient, right, left)?;
        debug!(series = plan.series.len(), "Planned chart");

        let (width, height) = (self.style.width, self.style.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        self.draw(&plan, &mut buffer)?;

        let png = encode_png(&buffer, width, height)?;
        info!(bytes = png.len(), width, height, "Rendered percentile chart");
        Ok(RenderedChart::new(png, width, height))
    }

    fn name(&self) -> &'static str {
        "percentile"
    }
}

/// Encodes a packed RGB buffer as PNG in memory.
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(buffer, width, height, ColorType::Rgb8)?;
    if png.is_empty() {
        return Err(AxialError::rendering("PNG encoder produced no data"));
    }
    Ok(png)
}

/// Bounds covering every point, padded by 5% on each side.
fn padded_ranges(series: &[PlotSeries]) -> (Range<f64>, Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for &(x, y) in series.iter().flat_map(|s| s.points.iter()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    (pad(x_min, x_max), pad(y_min, y_max))
}

/// Rejects ranges whose bounds or span overflow; plotters cannot place
/// ticks on them and never returns.
fn ensure_drawable(axis: &str, range: &Range<f64>) -> Result<()> {
    let span = (range.end - range.start) * 2.0;
    if range.start.is_finite() && range.end.is_finite() && span.is_finite() {
        Ok(())
    } else {
        Err(AxialError::rendering(format!(
            "{axis} values span {:e} to {:e}, too wide to draw",
            range.start, range.end
        )))
    }
}

fn pad(min: f64, max: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let span = max - min;
    if span <= f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }
    let padding = span * 0.05;
    (min - padding)..(max + padding)
}
