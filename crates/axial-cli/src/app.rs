//! Argument handling and the render-and-write flow.

use crate::error::{CliError, CliResult};
use axial_charts::{generate_chart, ChartOutcome, ChartRequest, PercentileChartRenderer, RenderedChart};
use axial_common::LoggingConfig;
use axial_config::{Config, ConfigLoader};
use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render an axial length percentile chart for one patient.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (YAML or TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON file holding the whole request, instead of the field flags
    #[arg(
        long,
        conflicts_with_all = [
            "hospital_id", "dob", "sex",
            "right_dates", "right_lengths", "left_dates", "left_lengths",
        ]
    )]
    pub request: Option<PathBuf>,

    /// Patient or study identifier
    #[arg(long)]
    pub hospital_id: Option<String>,

    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub dob: Option<String>,

    /// male or female
    #[arg(long)]
    pub sex: Option<String>,

    /// Right eye measurement date; repeat per reading
    #[arg(long = "right-date", value_name = "DATE")]
    pub right_dates: Vec<String>,

    /// Right eye axial length in mm; repeat per reading
    #[arg(long = "right-length", value_name = "MM")]
    pub right_lengths: Vec<String>,

    /// Left eye measurement date; repeat per reading
    #[arg(long = "left-date", value_name = "DATE")]
    pub left_dates: Vec<String>,

    /// Left eye axial length in mm; repeat per reading
    #[arg(long = "left-length", value_name = "MM")]
    pub left_lengths: Vec<String>,

    /// Write the PNG here instead of printing base64 to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a data:image/png;base64 URI instead of bare base64
    #[arg(long)]
    pub data_uri: bool,

    /// Log level, overriding the configuration file
    #[arg(short, long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Builds the chart request from `--request` or the individual flags.
    ///
    /// Absent flags become empty strings so that the usual required-field
    /// message is reported.
    pub fn chart_request(&self) -> CliResult<ChartRequest> {
        if let Some(path) = &self.request {
            return read_request(path);
        }
        Ok(ChartRequest {
            hospital_id: self.hospital_id.clone().unwrap_or_default(),
            dob: self.dob.clone().unwrap_or_default(),
            sex: self.sex.clone().unwrap_or_default(),
            measurement_dates_right: self.right_dates.clone(),
            axial_lengths_right: self.right_lengths.clone(),
            measurement_dates_left: self.left_dates.clone(),
            axial_lengths_left: self.left_lengths.clone(),
        })
    }

    /// Subscriber settings from the configuration, with `--log-level` applied.
    pub fn logging_config(&self, config: &Config) -> LoggingConfig {
        let mut logging = config.logging.to_logging_config();
        if let Some(level) = &self.log_level {
            logging.level.clone_from(level);
        }
        logging
    }
}

/// Loads configuration from `--config`, or the usual search path.
pub fn load_config(args: &Args) -> CliResult<Config> {
    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    Ok(config)
}

fn read_request(path: &Path) -> CliResult<ChartRequest> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| CliError::Request {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders the chart and writes it to the output file or `out`.
pub fn run(args: &Args, config: &Config, out: &mut impl Write) -> CliResult<()> {
    let request = args.chart_request()?;
    let renderer = PercentileChartRenderer::from_config(config)?;

    match generate_chart(&request, &renderer) {
        ChartOutcome::Rendered(chart) => emit(&chart, args, out),
        ChartOutcome::Failed(message) => Err(CliError::Chart(message)),
    }
}

fn emit(chart: &RenderedChart, args: &Args, out: &mut impl Write) -> CliResult<()> {
    if let Some(path) = &args.output {
        fs::write(path, chart.png())?;
        info!(path = %path.display(), bytes = chart.png().len(), "Wrote chart");
        if args.data_uri {
            writeln!(out, "{}", chart.data_uri())?;
        }
        return Ok(());
    }

    let text = if args.data_uri {
        chart.data_uri()
    } else {
        chart.to_base64()
    };
    writeln!(out, "{text}")?;
    Ok(())
}
