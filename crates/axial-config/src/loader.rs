//! Configuration loading with environment variable overrides.

use crate::schema::Config;
use crate::validation::ConfigValidator;
use axial_common::{AxialError, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "AXIAL_CONFIG_PATH";

/// Files probed in the working directory when no path is given.
const DEFAULT_FILES: [&str; 3] = ["axial.yaml", "axial.yml", "axial.toml"];

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the environment-named file, a default file in
    /// the working directory, or built-in defaults, then apply overrides and
    /// validate.
    pub fn load() -> Result<Config> {
        let mut config = if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            Self::read_file(&path)?
        } else if let Some(path) = DEFAULT_FILES.iter().map(Path::new).find(|p| p.exists()) {
            Self::read_file(path)?
        } else {
            debug!("No configuration file found, using defaults");
            Config::default()
        };

        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, then apply overrides and validate.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let mut config = Self::read_file(path.as_ref())?;
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Parse a YAML or TOML file, chosen by extension. Missing keys take
    /// their defaults.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AxialError::config_with_source(
                format!("Failed to read configuration file '{}'", path.display()),
                e,
            )
        })?;

        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
            other => {
                return Err(AxialError::config(format!(
                    "Unsupported configuration format {:?} for '{}'",
                    other.unwrap_or(""),
                    path.display()
                )))
            }
        };

        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Apply `AXIAL_*` environment variable overrides.
    pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
        Self::apply_overrides_from(config, |key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(width) = lookup("AXIAL_CHART_WIDTH") {
            config.chart.width = parse_var("AXIAL_CHART_WIDTH", &width)?;
        }

        if let Some(height) = lookup("AXIAL_CHART_HEIGHT") {
            config.chart.height = parse_var("AXIAL_CHART_HEIGHT", &height)?;
        }

        if let Some(color) = lookup("AXIAL_BACKGROUND_COLOR") {
            config.chart.background_color = color;
        }

        if let Some(color) = lookup("AXIAL_RIGHT_EYE_COLOR") {
            config.chart.right_eye_color = color;
        }

        if let Some(color) = lookup("AXIAL_LEFT_EYE_COLOR") {
            config.chart.left_eye_color = color;
        }

        if let Some(family) = lookup("AXIAL_FONT_FAMILY") {
            config.chart.font_family = family;
        }

        if let Some(show) = lookup("AXIAL_SHOW_GRID") {
            config.chart.show_grid = parse_var("AXIAL_SHOW_GRID", &show)?;
        }

        if let Some(path) = lookup("AXIAL_MALE_TABLE") {
            config.reference.male_table = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("AXIAL_FEMALE_TABLE") {
            config.reference.female_table = Some(PathBuf::from(path));
        }

        if let Some(level) = lookup("AXIAL_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = lookup("AXIAL_LOG_JSON") {
            config.logging.json = parse_var("AXIAL_LOG_JSON", &json)?;
        }

        if let Some(pretty) = lookup("AXIAL_LOG_PRETTY") {
            config.logging.pretty = parse_var("AXIAL_LOG_PRETTY", &pretty)?;
        }

        if let Some(spans) = lookup("AXIAL_LOG_SPANS") {
            config.logging.spans = parse_var("AXIAL_LOG_SPANS", &spans)?;
        }

        if let Some(file) = lookup("AXIAL_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| {
        AxialError::config_with_source(format!("Failed to parse environment variable '{var}'"), e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(
            &mut config,
            lookup(&[
                ("AXIAL_CHART_WIDTH", "1600"),
                ("AXIAL_LEFT_EYE_COLOR", "#ff0000"),
                ("AXIAL_SHOW_GRID", "false"),
                ("AXIAL_MALE_TABLE", "/srv/tables/males.csv"),
                ("AXIAL_LOG_JSON", "true"),
                ("AXIAL_LOG_SPANS", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(config.chart.width, 1600);
        assert_eq!(config.chart.height, 800);
        assert_eq!(config.chart.left_eye_color, "#ff0000");
        assert!(!config.chart.show_grid);
        assert_eq!(
            config.reference.male_table,
            Some(PathBuf::from("/srv/tables/males.csv"))
        );
        assert!(config.logging.json);
        assert!(config.logging.spans);
        assert!(!config.logging.pretty);
    }

    #[test]
    fn test_bad_numeric_override() {
        let mut config = Config::default();
        let err =
            ConfigLoader::apply_overrides_from(&mut config, lookup(&[("AXIAL_CHART_HEIGHT", "tall")]))
                .unwrap_err();
        assert!(err.to_string().contains("AXIAL_CHART_HEIGHT"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("axial.ini");
        std::fs::write(&path, "width=1").unwrap();

        let err = ConfigLoader::read_file(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported configuration format"));
    }
}
