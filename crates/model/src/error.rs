use std::path::PathBuf;

use cirrus_namelist::{LookupError, NamelistError, SchemaError};
use cirrus_output::OutputError;
use cirrus_physics::StateError;

/// Error loading configuration, setting up grids or stepping the model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
	#[error("failed to read {}: {source}", path.display())]
	Io { path: PathBuf, source: std::io::Error },

	#[error("namelist schema defect: {0}")]
	Schema(#[from] SchemaError),

	#[error(transparent)]
	Namelist(#[from] NamelistError),

	#[error("namelist lookup failed: {0}")]
	Lookup(#[from] LookupError),

	#[error("RUNTYPE '{0}' is not supported; expected INITIAL")]
	Runtype(String),

	#[error("NGRIDS = {ngrids} but {name} supplies {supplied} value(s)")]
	GridSizes { name: &'static str, ngrids: usize, supplied: usize },

	#[error("{name} = {value}s is shorter than DTLONG = {dtlong}s")]
	Frequency { name: &'static str, value: f64, dtlong: f64 },

	#[error("sounding: {name} supplies {actual} level(s) but PS supplies {expected}")]
	SoundingLength { name: &'static str, expected: usize, actual: usize },

	#[error("sounding: pressure must decrease with height, but level {level} has {pressure} hPa above {below} hPa")]
	SoundingOrder { level: usize, pressure: f64, below: f64 },

	#[error("LITE_VARS names fields that are not registered for lite output: {}", names.join(", "))]
	LiteVars { names: Vec<String> },

	#[error(transparent)]
	State(#[from] StateError),

	#[error(transparent)]
	Output(#[from] OutputError),
}
