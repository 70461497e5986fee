//! The model's namelist groups.
//!
//! Every recognized configuration name is declared here and nowhere else.

use cirrus_namelist::{Catalog, GroupDecl, ParamDef, SchemaError};

/// Most grids a run may nest.
pub const MAX_GRIDS: usize = 4;
/// Most sounding levels accepted in `$MODEL_SOUND`.
pub const MAX_SOUNDING_LEVELS: usize = 40;
/// Most names accepted in `LITE_VARS`.
pub const MAX_LITE_VARS: usize = 50;

pub const GRIDS: &str = "MODEL_GRIDS";
pub const FILE_INFO: &str = "MODEL_FILE_INFO";
pub const OPTIONS: &str = "MODEL_OPTIONS";
pub const SOUND: &str = "MODEL_SOUND";

fn grids() -> GroupDecl {
	GroupDecl::new(GRIDS).declared_count(10).params([
		ParamDef::int("NGRIDS", 1..=MAX_GRIDS as i64).default(1),
		ParamDef::int("NNXP", 3..=2000).array(MAX_GRIDS),
		ParamDef::int("NNYP", 3..=2000).array(MAX_GRIDS),
		ParamDef::int("NNZP", 3..=500).array(MAX_GRIDS),
		ParamDef::real("DELTAX", 1.0..=1.0e6).default(1000.0),
		ParamDef::real("DELTAY", 1.0..=1.0e6).default(1000.0),
		ParamDef::real("DELTAZ", 1.0..=1.0e4).default(250.0),
		ParamDef::int("NESTRATIO", 1..=5).default(3),
		ParamDef::real("DTLONG", 0.01..=3600.0).default(10.0),
		ParamDef::real("TIMMAX", 0.0..=1.0e8).default(3600.0),
	])
}

fn file_info() -> GroupDecl {
	GroupDecl::new(FILE_INFO).declared_count(6).params([
		ParamDef::string("RUNTYPE", 16).default("INITIAL"),
		ParamDef::string("EXPNME", 64).default("cirrus"),
		ParamDef::real("FRQHIS", 0.0..=1.0e8).default(3600.0),
		ParamDef::real("FRQLITE", 0.0..=1.0e8).default(0.0),
		ParamDef::real("FRQMEAN", 0.0..=1.0e8).default(0.0),
		ParamDef::string("LITE_VARS", 32).array(MAX_LITE_VARS),
	])
}

fn options() -> GroupDecl {
	GroupDecl::new(OPTIONS).declared_count(6).params([
		ParamDef::int("IUVWTEND", 0..=1).default(0),
		ParamDef::int("IMEANTEND", 0..=1).default(0),
		ParamDef::real("BUBBLE_DTH", -20.0..=20.0).default(0.0),
		ParamDef::real("HILL_HGT", 0.0..=8000.0).default(0.0),
		ParamDef::real("HILL_WID", 0.0..=1.0e6).default(10000.0),
		ParamDef::real("SOIL_MOIST", 0.0..=1.0).default(0.3),
	])
}

fn sound() -> GroupDecl {
	GroupDecl::new(SOUND).declared_count(4).params([
		ParamDef::real("PS", 1.0..=1100.0).array(MAX_SOUNDING_LEVELS),
		ParamDef::real("TS", 150.0..=350.0).array(MAX_SOUNDING_LEVELS),
		ParamDef::real("US", -150.0..=150.0).array(MAX_SOUNDING_LEVELS),
		ParamDef::real("VS", -150.0..=150.0).array(MAX_SOUNDING_LEVELS),
	])
}

/// Builds the catalog of all model groups.
///
/// # Errors
///
/// Any [`SchemaError`] here is a defect in the declarations above.
pub fn catalog() -> Result<Catalog, SchemaError> {
	Catalog::build([grids(), file_info(), options(), sound()])
}

#[cfg(test)]
mod tests;
