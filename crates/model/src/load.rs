//! Reading a namelist file into a validated configuration.

use std::path::Path;

use cirrus_namelist::Namelist;

use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::schema;

/// A parsed namelist together with the configuration built from it.
#[derive(Debug, Clone)]
pub struct Loaded {
	pub namelist: Namelist,
	pub config: ModelConfig,
}

/// Parses namelist `text` against the model catalog and validates it.
pub fn load_str(text: &str) -> Result<Loaded, ModelError> {
	let catalog = schema::catalog()?;
	let namelist = cirrus_namelist::parse(&catalog, text)?;
	let config = ModelConfig::from_namelist(&namelist)?;
	Ok(Loaded { namelist, config })
}

/// Reads and loads the namelist file at `path`.
pub fn load_file(path: &Path) -> Result<Loaded, ModelError> {
	let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io { path: path.to_path_buf(), source })?;
	tracing::debug!(path = %path.display(), bytes = text.len(), "read namelist");
	load_str(&text)
}
