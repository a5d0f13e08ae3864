//! Application-wide error types using thiserror.

use axial_common::AxialError;
use std::path::PathBuf;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration, validation, or rendering error from the library crates.
    #[error(transparent)]
    Axial(#[from] AxialError),

    /// The chart could not be produced; carries the user-facing message.
    #[error("{0}")]
    Chart(String),

    /// A `--request` file was not valid JSON.
    #[error("Invalid request file '{}': {source}", path.display())]
    Request {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// Logging could not be initialized.
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Message to print on stderr before exiting.
    pub fn user_message(&self) -> String {
        match self {
            Self::Axial(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

/// Result type for the command-line application.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let err = CliError::from(AxialError::invalid_sex());
        assert_eq!(err.user_message(), "Invalid sex entered.");

        let err = CliError::Chart("Please fill out all required fields.".to_string());
        assert_eq!(err.user_message(), "Please fill out all required fields.");
    }
}
