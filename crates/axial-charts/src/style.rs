//! Colors, fonts, and dimensions for a chart.

use axial_common::{AxialError, Result};
use axial_config::ChartConfig;
use plotters::style::RGBColor;

/// Percentile curve colors, cycled in column order. Blue and green are left
/// out so the default eye colors stay distinct from every curve.
pub const PERCENTILE_PALETTE: [RGBColor; 8] = [
    RGBColor(255, 127, 14),  // Orange
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

/// Parse a `#RRGGBB` string.
pub fn parse_hex_color(color: &str) -> Result<RGBColor> {
    let invalid = || AxialError::config(format!("'{color}' is not a #RRGGBB color"));

    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };
    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Resolved rendering style.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Canvas fill.
    pub background: RGBColor,
    /// Right eye line and markers.
    pub right_eye: RGBColor,
    /// Left eye line and markers.
    pub left_eye: RGBColor,
    /// Font family for all text.
    pub font_family: String,
    /// Title size in pixels.
    pub title_font_size: u32,
    /// Axis text size in pixels.
    pub label_font_size: u32,
    /// Legend text size in pixels.
    pub legend_font_size: u32,
    /// Draw the light grid.
    pub show_grid: bool,
    /// Draw the legend box.
    pub show_legend: bool,
}

impl ChartStyle {
    /// Color for the percentile curve in the given column.
    pub fn percentile_color(index: usize) -> RGBColor {
        PERCENTILE_PALETTE[index % PERCENTILE_PALETTE.len()]
    }
}

impl TryFrom<&ChartConfig> for ChartStyle {
    type Error = AxialError;

    fn try_from(config: &ChartConfig) -> Result<Self> {
        Ok(Self {
            width: config.width,
            height: config.height,
            background: parse_hex_color(&config.background_color)?,
            right_eye: parse_hex_color(&config.right_eye_color)?,
            left_eye: parse_hex_color(&config.left_eye_color)?,
            font_family: config.font_family.clone(),
            title_font_size: config.title_font_size,
            label_font_size: config.label_font_size,
            legend_font_size: config.legend_font_size,
            show_grid: config.show_grid,
            show_legend: config.show_legend,
        })
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            background: RGBColor(255, 255, 255),
            right_eye: RGBColor(31, 119, 180),
            left_eye: RGBColor(44, 160, 44),
            font_family: "sans-serif".to_string(),
            title_font_size: 28,
            label_font_size: 20,
            legend_font_size: 16,
            show_grid: true,
            show_legend: true,
        }
    }
}
