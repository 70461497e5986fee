//! Typed model configuration.
//!
//! # Role
//!
//! [`ModelConfig`] is built once from the resolved [`Namelist`] and validated
//! across parameters. Components receive only the view they need:
//! [`GridConfig`], [`OutputConfig`], [`TendencyFlags`], [`Initial`] or
//! [`Sounding`].
//!
//! # Invariants
//!
//! - Every grid up to `NGRIDS` has its extents supplied.
//! - Enabled output intervals are at least one long timestep.
//! - Sounding levels have strictly decreasing pressure.

use cirrus_namelist::Namelist;
use cirrus_output::{LiteSelection, OutputSchedule};
use cirrus_physics::{GRAVITY, Geometry, Initial, ReferenceState, TendencyFlags};
use cirrus_registry::GridDims;

use crate::error::ModelError;

/// Gas constant of dry air, J kg⁻¹ K⁻¹.
const RD: f64 = 287.04;
/// Specific heat of dry air at constant pressure, J kg⁻¹ K⁻¹.
const CP: f64 = 1004.0;

/// Validated model configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
	pub runtype: String,
	pub grids: GridConfig,
	pub output: OutputConfig,
	pub tendency: TendencyFlags,
	pub initial: Initial,
	pub sounding: Sounding,
}

/// Extents of one grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
	pub nx: usize,
	pub ny: usize,
	pub nz: usize,
}

/// Grid extents, spacing and time control.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
	pub sizes: Vec<GridSize>,
	pub deltax: f64,
	pub deltay: f64,
	pub deltaz: f64,
	pub nestratio: u32,
	pub dtlong: f64,
	pub timmax: f64,
}

impl GridConfig {
	pub fn ngrids(&self) -> usize {
		self.sizes.len()
	}

	pub fn dims(&self, grid: usize) -> GridDims {
		let size = self.sizes[grid];
		GridDims::new(size.nx, size.ny, size.nz)
	}

	/// Spacing of `grid`; each nested grid refines the horizontal spacing of
	/// its parent by `nestratio`.
	pub fn geometry(&self, grid: usize) -> Geometry {
		let refinement = f64::from(self.nestratio).powi(grid as i32);
		Geometry { dx: (self.deltax / refinement) as f32, dy: (self.deltay / refinement) as f32, dz: self.deltaz as f32 }
	}

	/// Long timesteps needed to reach `timmax`.
	pub fn steps(&self) -> usize {
		(self.timmax / self.dtlong).ceil() as usize
	}
}

/// Experiment name, output cadence and lite selection.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
	pub expnme: String,
	pub frqhis: f64,
	pub frqlite: f64,
	pub frqmean: f64,
	pub lite_vars: Vec<String>,
}

impl OutputConfig {
	pub fn schedule(&self) -> OutputSchedule {
		OutputSchedule::new(self.frqhis, self.frqlite, self.frqmean)
	}

	pub fn lite_selection(&self) -> LiteSelection {
		LiteSelection::new(&self.lite_vars)
	}
}

/// One level of the initial sounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundingLevel {
	/// hPa
	pub pressure: f64,
	/// K
	pub temperature: f64,
	pub u: f64,
	pub v: f64,
}

/// Initial sounding, surface first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sounding {
	pub levels: Vec<SoundingLevel>,
}

impl Sounding {
	pub fn is_empty(&self) -> bool {
		self.levels.is_empty()
	}

	/// Interpolates the sounding onto `levels` model levels `dz` metres apart.
	///
	/// Level heights come from the hypsometric equation. Model levels above the
	/// top of the sounding take its top values. Returns `None` without a sounding.
	pub fn reference_state(&self, levels: usize, dz: f64) -> Option<ReferenceState> {
		let surface = self.levels.first()?;
		let mut heights = Vec::with_capacity(self.levels.len());
		let mut z = 0.0;
		heights.push(z);
		for pair in self.levels.windows(2) {
			let mean_t = 0.5 * (pair[0].temperature + pair[1].temperature);
			z += RD * mean_t / f64::from(GRAVITY) * (pair[0].pressure / pair[1].pressure).ln();
			heights.push(z);
		}

		let mut reference = ReferenceState::uniform(levels, surface.temperature as f32, 1.0);
		for k in 0..levels {
			let (lo, hi, w) = bracket(&heights, (k as f64 + 0.5) * dz);
			let (a, b) = (&self.levels[lo], &self.levels[hi]);
			let lerp = |x: f64, y: f64| x + w * (y - x);
			let temperature = lerp(a.temperature, b.temperature);
			let pressure = lerp(a.pressure.ln(), b.pressure.ln()).exp();
			reference.theta[k] = (temperature * (1000.0 / pressure).powf(RD / CP)) as f32;
			reference.density[k] = (pressure * 100.0 / (RD * temperature)) as f32;
			reference.u[k] = lerp(a.u, b.u) as f32;
			reference.v[k] = lerp(a.v, b.v) as f32;
		}
		Some(reference)
	}
}

/// Indices of the sounding levels around height `z` and the weight of the upper one.
fn bracket(heights: &[f64], z: f64) -> (usize, usize, f64) {
	let last = heights.len() - 1;
	match heights.iter().position(|&h| h >= z) {
		None => (last, last, 0.0),
		Some(0) => (0, 0, 0.0),
		Some(hi) => {
			let lo = hi - 1;
			(lo, hi, (z - heights[lo]) / (heights[hi] - heights[lo]))
		}
	}
}

impl ModelConfig {
	/// Builds and validates the configuration.
	///
	/// # Errors
	///
	/// Returns the first cross-parameter inconsistency found.
	pub fn from_namelist(nl: &Namelist) -> Result<Self, ModelError> {
		let runtype = nl.string("RUNTYPE")?.trim().to_ascii_uppercase();
		if runtype != "INITIAL" {
			return Err(ModelError::Runtype(runtype));
		}

		let grids = grid_config(nl)?;
		let output = output_config(nl, grids.dtlong)?;
		let tendency = TendencyFlags { momentum: nl.int("IUVWTEND")? == 1, time_mean: nl.int("IMEANTEND")? == 1 };
		if tendency.time_mean && !tendency.momentum {
			tracing::warn!("IMEANTEND = 1 has no effect while IUVWTEND = 0");
		}
		let initial = Initial {
			bubble: nl.real("BUBBLE_DTH")? as f32,
			hill_height: nl.real("HILL_HGT")? as f32,
			hill_width: nl.real("HILL_WID")? as f32,
			soil_moisture: nl.real("SOIL_MOIST")? as f32,
		};
		let sounding = sounding(nl)?;

		Ok(Self { runtype, grids, output, tendency, initial, sounding })
	}
}

fn grid_config(nl: &Namelist) -> Result<GridConfig, ModelError> {
	let ngrids = nl.int("NGRIDS")? as usize;
	let mut extents = Vec::with_capacity(3);
	for name in ["NNXP", "NNYP", "NNZP"] {
		let supplied = nl.filled(name)?;
		if supplied < ngrids {
			return Err(ModelError::GridSizes { name, ngrids, supplied });
		}
		extents.push(nl.ints(name)?);
	}
	let sizes = (0..ngrids)
		.map(|g| GridSize { nx: extents[0][g] as usize, ny: extents[1][g] as usize, nz: extents[2][g] as usize })
		.collect();

	Ok(GridConfig {
		sizes,
		deltax: nl.real("DELTAX")?,
		deltay: nl.real("DELTAY")?,
		deltaz: nl.real("DELTAZ")?,
		nestratio: nl.int("NESTRATIO")? as u32,
		dtlong: nl.real("DTLONG")?,
		timmax: nl.real("TIMMAX")?,
	})
}

fn output_config(nl: &Namelist, dtlong: f64) -> Result<OutputConfig, ModelError> {
	let mut frequencies = [0.0; 3];
	for (slot, name) in frequencies.iter_mut().zip(["FRQHIS", "FRQLITE", "FRQMEAN"]) {
		let value = nl.real(name)?;
		if value > 0.0 && value < dtlong {
			return Err(ModelError::Frequency { name, value, dtlong });
		}
		*slot = value;
	}
	let [frqhis, frqlite, frqmean] = frequencies;

	let lite_vars: Vec<String> = nl.strings("LITE_VARS")?.into_iter().map(str::trim).filter(|name| !name.is_empty()).map(str::to_string).collect();
	if frqlite > 0.0 && lite_vars.is_empty() {
		tracing::warn!("FRQLITE is set but LITE_VARS is empty; lite output will be empty");
	}

	Ok(OutputConfig { expnme: nl.string("EXPNME")?.to_string(), frqhis, frqlite, frqmean, lite_vars })
}

fn sounding(nl: &Namelist) -> Result<Sounding, ModelError> {
	let count = nl.filled("PS")?;
	for (name, optional) in [("TS", false), ("US", true), ("VS", true)] {
		let actual = nl.filled(name)?;
		if actual != count && !(optional && actual == 0) {
			return Err(ModelError::SoundingLength { name, expected: count, actual });
		}
	}

	let (ps, ts, us, vs) = (nl.reals("PS")?, nl.reals("TS")?, nl.reals("US")?, nl.reals("VS")?);
	let levels: Vec<_> = (0..count)
		.map(|k| SoundingLevel { pressure: ps[k], temperature: ts[k], u: us[k], v: vs[k] })
		.collect();
	if let Some(level) = levels.windows(2).position(|pair| pair[1].pressure >= pair[0].pressure) {
		return Err(ModelError::SoundingOrder { level: level + 1, pressure: levels[level + 1].pressure, below: levels[level].pressure });
	}
	Ok(Sounding { levels })
}
