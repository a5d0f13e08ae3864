//! Field validators and the whole-config validation entry point.

use crate::schema::Config;
use axial_common::{AxialError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError};

/// Regex pattern for hex color codes (e.g., #FFFFFF, #1f77b4)
pub static HEX_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Validate a `#RRGGBB` color string.
pub fn validate_hex_color(color: &str) -> std::result::Result<(), ValidationError> {
    if HEX_COLOR_REGEX.is_match(color) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_hex_color");
        error.message = Some(format!("'{color}' is not a #RRGGBB color").into());
        Err(error)
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, including that configured table files exist.
    pub fn validate(config: &Config) -> Result<()> {
        config
            .validate()
            .map_err(|e| AxialError::config_with_source("Configuration validation failed", e))?;

        let tables = [
            ("reference.male_table", &config.reference.male_table),
            ("reference.female_table", &config.reference.female_table),
        ];
        for (key, path) in tables {
            if let Some(path) = path {
                if !path.is_file() {
                    return Err(AxialError::config(format!(
                        "{key} points to '{}', which is not a readable file",
                        path.display()
                    )));
                }
            }
        }

        Ok(())
    }
}
