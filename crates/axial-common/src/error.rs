//! Error types and utilities for axial length charting

use crate::types::Eye;
use thiserror::Error;

/// Result type alias for charting operations
pub type Result<T> = std::result::Result<T, AxialError>;

/// Message shown when a required form field is empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill out all required fields.";

/// Message shown when the sex field does not name a reference dataset.
pub const INVALID_SEX_MESSAGE: &str = "Invalid sex entered.";

/// Main error type for charting operations
#[derive(Error, Debug)]
pub enum AxialError {
    /// User input that fails a designed check; the message is shown verbatim
    #[error("{message}")]
    Validation {
        /// Text shown to the user.
        message: String,
        /// Form field that failed, when there is one.
        field: Option<String>,
    },

    /// A numeric field that cannot be parsed as a finite number
    #[error("could not convert {field} to a number: '{value}'")]
    InvalidNumber {
        /// What the number was meant to be.
        field: String,
        /// Submitted text.
        value: String,
    },

    /// A date that cannot be parsed, or that precedes the date of birth
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// What was wrong with the date.
        message: String,
        /// Submitted text.
        value: String,
    },

    /// Parallel measurement lists that do not pair up
    #[error("Data consistency error: {message}")]
    DataConsistency {
        /// Description including both list lengths.
        message: String,
        /// Eye whose lists disagree.
        eye: Option<Eye>,
    },

    /// Reference table loading or shape errors
    #[error("Reference data error: {message}")]
    Reference {
        /// What failed.
        message: String,
        /// Underlying error, when there is one.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Chart composition or image encoding errors
    #[error("Rendering error: {message}")]
    Rendering {
        /// What failed.
        message: String,
        /// Underlying error, when there is one.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// What failed.
        message: String,
        /// Underlying error, when there is one.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AxialError {
    /// Create the error for an empty required field
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::Validation {
            message: MISSING_FIELDS_MESSAGE.to_string(),
            field: Some(field.into()),
        }
    }

    /// Create the error for a sex value with no reference dataset
    pub fn invalid_sex() -> Self {
        Self::Validation {
            message: INVALID_SEX_MESSAGE.to_string(),
            field: Some("sex".to_string()),
        }
    }

    /// Create a new number parsing error
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a new date error
    pub fn invalid_date(msg: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: msg.into(),
            value: value.into(),
        }
    }

    /// Create a new data consistency error for one eye
    pub fn data_consistency(msg: impl Into<String>, eye: Eye) -> Self {
        Self::DataConsistency {
            message: msg.into(),
            eye: Some(eye),
        }
    }

    /// Create a new reference data error
    pub fn reference(msg: impl Into<String>) -> Self {
        Self::Reference {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new reference data error with source
    pub fn reference_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Reference {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new rendering error
    pub fn rendering(msg: impl Into<String>) -> Self {
        Self::Rendering {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new rendering error with source
    pub fn rendering_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Rendering {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error came from user input rather than a system fault
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::InvalidNumber { .. }
                | Self::InvalidDate { .. }
                | Self::DataConsistency { .. }
        )
    }

    /// The message to show the person who submitted the form.
    ///
    /// Designed validation messages pass through unchanged; everything else
    /// is wrapped in a generic prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            other => format!("An error occurred: {other}"),
        }
    }
}

// Error conversion implementations for external types

impl From<csv::Error> for AxialError {
    fn from(err: csv::Error) -> Self {
        Self::reference_with_source("CSV parsing error", err)
    }
}

impl From<image::ImageError> for AxialError {
    fn from(err: image::ImageError) -> Self {
        Self::rendering_with_source("PNG encoding failed", err)
    }
}

impl From<serde_yaml::Error> for AxialError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_with_source("YAML parsing error", err)
    }
}

impl From<toml::de::Error> for AxialError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML parsing error", err)
    }
}

/// Convert from plotters drawing errors to AxialError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for AxialError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::rendering_with_source("Chart drawing failed", err)
    }
}
