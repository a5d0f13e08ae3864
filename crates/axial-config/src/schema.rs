//! Configuration schema definitions using serde with validation attributes.

use axial_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Chart rendering settings.
    #[validate]
    pub chart: ChartConfig,
    /// Reference dataset sources.
    pub reference: ReferenceConfig,
    /// Logging settings.
    #[validate]
    pub logging: LoggingSettings,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartConfig {
    /// Image width in pixels.
    #[validate(range(min = 200, max = 4000, message = "Width must be between 200 and 4000 pixels"))]
    pub width: u32,
    /// Image height in pixels.
    #[validate(range(min = 200, max = 4000, message = "Height must be between 200 and 4000 pixels"))]
    pub height: u32,
    /// Background color.
    #[validate(custom(function = "crate::validation::validate_hex_color"))]
    pub background_color: String,
    /// Right eye series color.
    #[validate(custom(function = "crate::validation::validate_hex_color"))]
    pub right_eye_color: String,
    /// Left eye series color.
    #[validate(custom(function = "crate::validation::validate_hex_color"))]
    pub left_eye_color: String,
    /// Font family for all text.
    #[validate(length(min = 1, message = "Font family cannot be empty"))]
    pub font_family: String,
    /// Title font size.
    #[validate(range(min = 8, max = 96, message = "Font size must be between 8 and 96"))]
    pub title_font_size: u32,
    /// Axis description and tick label font size.
    #[validate(range(min = 8, max = 96, message = "Font size must be between 8 and 96"))]
    pub label_font_size: u32,
    /// Legend font size.
    #[validate(range(min = 8, max = 96, message = "Font size must be between 8 and 96"))]
    pub legend_font_size: u32,
    /// Whether to draw the light grid.
    pub show_grid: bool,
    /// Whether to draw the legend box.
    pub show_legend: bool,
}

/// Reference table sources. Built-in tables are used where a path is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// CSV file with male percentile curves.
    pub male_table: Option<PathBuf>,
    /// CSV file with female percentile curves.
    pub female_table: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level filter directive; `RUST_LOG` overrides it.
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Multi-line human-readable output; ignored when `json` is set.
    pub pretty: bool,
    /// Also log span open and close events.
    pub spans: bool,
    /// Append logs to this file instead of stderr.
    pub file: Option<String>,
}

impl LoggingSettings {
    /// Converts to the subscriber configuration in `axial-common`.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json,
            pretty_format: self.pretty,
            include_spans: self.spans,
            file_path: self.file.clone(),
            ..LoggingConfig::default()
        }
    }
}
