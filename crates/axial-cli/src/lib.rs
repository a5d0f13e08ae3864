//! # Axial Chart CLI
//!
//! Command-line front end for axial length percentile charts.
//!
//! Collects the same fields a clinic web form would, hands them to
//! `axial-charts`, and writes the PNG to a file or prints it as base64.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;

pub use app::*;
pub use error::*;
