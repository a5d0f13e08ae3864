//! # Axial Config
//!
//! Type-safe configuration for the axial length percentile charts.
//!
//! Configuration is read from YAML or TOML, overridden from `AXIAL_*`
//! environment variables, and validated before use.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::*;
pub use schema::*;
pub use validation::*;
