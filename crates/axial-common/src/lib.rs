//! # Axial Common
//!
//! Shared types, errors, and logging for the axial length percentile charts.
//!
//! This crate provides the foundational types used across the other crates
//! in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{AxialError, Result, INVALID_SEX_MESSAGE, MISSING_FIELDS_MESSAGE};
pub use logging::{init_logging, LoggingConfig};
pub use types::*;
