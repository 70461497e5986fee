//! Cirrus model setup and time stepping.
//!
//! A run starts from a namelist file. [`load_file`] parses it against the
//! catalog in [`schema`] and builds a validated [`ModelConfig`]. [`Model::new`]
//! then allocates and registers every grid, and [`Model::run`] steps it,
//! handing registered fields to the output driver after each step.

pub mod config;
pub mod error;
pub mod load;
pub mod model;
pub mod schema;

pub use config::{GridConfig, GridSize, ModelConfig, OutputConfig, Sounding, SoundingLevel};
pub use error::ModelError;
pub use load::{Loaded, load_file, load_str};
pub use model::{Model, RunSummary};
