//! Prognostic state and tendency arrays of one grid.
//!
//! # Role
//!
//! [`GridState`] owns every field of a grid. [`GridState::register`] enters
//! them into the grid's registry from the descriptor tables below;
//! [`GridState::release`] unregisters them before the storage is dropped.
//!
//! # Invariants
//!
//! - [`STATE_TABLE`] lists fields in the order of `GridState::state_fields`,
//!   and [`TENDENCY_TABLE`] in the order of `Tendencies::fields`.
//! - A reference state, when present, has one value per model level.

use cirrus_registry::{DimClass, Field, GridDims, IntentFlags, Layout, MeanBuffer, VariableRegistry, parse_table};

use crate::diagnostics::{MomentumDiagnostics, TendencyFlags};
use crate::error::StateError;
use crate::{advection, buoyancy, pgf};

/// Gravitational acceleration, m s⁻².
pub const GRAVITY: f32 = 9.81;

/// Prognostic and surface fields, in `GridState::state_fields` order.
pub const STATE_TABLE: [&str; 7] = [
	"UP : 3 : hist : lite : mpti",
	"VP : 3 : hist : lite : mpti",
	"WP : 3 : hist : lite : mpti",
	"PP : 3 : hist : lite : mpti",
	"THP : 3 : hist : lite : mpti",
	"TOPT : 2 : hist : lite",
	"SOILW : 4 : hist : mean",
];

/// Tendency arrays, in `Tendencies::fields` order.
pub const TENDENCY_TABLE: [&str; 4] = ["UT : 3 : mptt", "VT : 3 : mptt", "WT : 3 : mptt", "THT : 3 : mptt"];

/// Grid spacing in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
	pub dx: f32,
	pub dy: f32,
	pub dz: f32,
}

/// Horizontally uniform base state, one value per model level.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceState {
	/// Potential temperature, K.
	pub theta: Vec<f32>,
	/// Density, kg m⁻³.
	pub density: Vec<f32>,
	pub u: Vec<f32>,
	pub v: Vec<f32>,
}

impl ReferenceState {
	/// Calm, isentropic base state.
	pub fn uniform(levels: usize, theta: f32, density: f32) -> Self {
		Self { theta: vec![theta; levels], density: vec![density; levels], u: vec![0.0; levels], v: vec![0.0; levels] }
	}

	pub fn levels(&self) -> usize {
		self.theta.len()
	}

	fn is_consistent(&self) -> bool {
		let n = self.levels();
		self.density.len() == n && self.u.len() == n && self.v.len() == n
	}
}

/// Initial perturbations and surface conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Initial {
	/// Peak potential temperature perturbation of a warm bubble at the domain centre, K.
	pub bubble: f32,
	/// Peak height of a bell-shaped hill at the domain centre, m.
	pub hill_height: f32,
	/// Half-width of the hill, m.
	pub hill_width: f32,
	/// Volumetric soil moisture fraction.
	pub soil_moisture: f32,
}

/// Tendency accumulators filled by the physics routines each step.
#[derive(Debug)]
pub struct Tendencies {
	pub ut: Field,
	pub vt: Field,
	pub wt: Field,
	pub tht: Field,
}

impl Tendencies {
	fn zeros(points: usize) -> Self {
		Self { ut: Field::zeros(points), vt: Field::zeros(points), wt: Field::zeros(points), tht: Field::zeros(points) }
	}

	/// Clears every tendency ahead of a step.
	pub fn zero(&self) {
		for field in self.fields() {
			field.fill(0.0);
		}
	}

	fn fields(&self) -> [&Field; 4] {
		[&self.ut, &self.vt, &self.wt, &self.tht]
	}
}

/// Fields of one grid.
#[derive(Debug)]
pub struct GridState {
	grid: usize,
	dims: GridDims,
	geometry: Geometry,
	reference: Option<ReferenceState>,
	pub up: Field,
	pub vp: Field,
	pub wp: Field,
	pub pp: Field,
	pub thp: Field,
	pub topt: Field,
	pub soilw: Field,
	soilw_mean: MeanBuffer,
	pub tend: Tendencies,
	pub diagnostics: MomentumDiagnostics,
}

impl GridState {
	/// Allocates every field of grid `grid`. Nothing is registered yet.
	pub fn new(grid: usize, dims: GridDims, geometry: Geometry, flags: TendencyFlags) -> Result<Self, StateError> {
		if dims.nx < 3 || dims.ny < 3 || dims.nz < 3 {
			return Err(StateError::TooSmall { grid, nx: dims.nx, ny: dims.ny, nz: dims.nz });
		}
		let atmos = DimClass::Atmos3d.points(&dims);
		let soil = DimClass::Soil4d.points(&dims);
		Ok(Self {
			grid,
			dims,
			geometry,
			reference: None,
			up: Field::zeros(atmos),
			vp: Field::zeros(atmos),
			wp: Field::zeros(atmos),
			pp: Field::zeros(atmos),
			thp: Field::zeros(atmos),
			topt: Field::zeros(DimClass::Horizontal2d.points(&dims)),
			soilw: Field::zeros(soil),
			soilw_mean: MeanBuffer::new(soil),
			tend: Tendencies::zeros(atmos),
			diagnostics: MomentumDiagnostics::new(atmos, flags)?,
		})
	}

	pub fn grid(&self) -> usize {
		self.grid
	}

	pub fn dims(&self) -> &GridDims {
		&self.dims
	}

	pub fn geometry(&self) -> &Geometry {
		&self.geometry
	}

	pub fn reference(&self) -> Option<&ReferenceState> {
		self.reference.as_ref()
	}

	/// Layout of the atmospheric fields.
	pub fn layout(&self) -> Layout {
		DimClass::Atmos3d.layout(&self.dims)
	}

	pub fn set_reference(&mut self, reference: ReferenceState) -> Result<(), StateError> {
		if reference.levels() != self.dims.nz || !reference.is_consistent() {
			return Err(StateError::ReferenceLevels { grid: self.grid, expected: self.dims.nz, actual: reference.levels() });
		}
		self.reference = Some(reference);
		Ok(())
	}

	/// Registers state fields, tendencies and any enabled diagnostics.
	pub fn register(&mut self, registry: &mut VariableRegistry) -> Result<(), StateError> {
		for (desc, field) in parse_table(&STATE_TABLE)?.iter().zip(self.state_fields()) {
			let mean = desc.intent.contains(IntentFlags::MEAN).then_some(&self.soilw_mean);
			registry.register_field(desc, field, mean)?;
		}
		for (desc, field) in parse_table(&TENDENCY_TABLE)?.iter().zip(self.tend.fields()) {
			registry.register_field(desc, field, None)?;
		}
		self.diagnostics.sync(registry)?;
		tracing::debug!(grid = self.grid, fields = registry.len(), "grid state registered");
		Ok(())
	}

	/// Unregisters every field, then drops the storage.
	pub fn release(mut self, registry: &mut VariableRegistry) {
		self.diagnostics.release(registry);
		for desc in STATE_TABLE.into_iter().chain(TENDENCY_TABLE) {
			if let Some(name) = desc.split(':').next() {
				registry.unregister(name.trim());
			}
		}
	}

	/// Sets initial conditions from the reference state and `init`.
	pub fn initialize(&self, init: &Initial) {
		let layout = self.layout();
		let surface = DimClass::Horizontal2d.layout(&self.dims);
		let Geometry { dx, dy, .. } = self.geometry;
		let (ci, cj) = ((layout.nx as f32 - 1.0) * 0.5, (layout.ny as f32 - 1.0) * 0.5);
		let distance = |i: usize, j: usize| ((i as f32 - ci) * dx).hypot((j as f32 - cj) * dy);

		let mut topt = self.topt.write();
		for j in 0..layout.ny {
			for i in 0..layout.nx {
				let r = distance(i, j);
				topt[surface.index(0, i, j, 0)] = if init.hill_width > 0.0 {
					init.hill_height / (1.0 + (r / init.hill_width).powi(2))
				} else {
					0.0
				};
			}
		}

		let (mut up, mut vp, mut thp, mut pp) = (self.up.write(), self.vp.write(), self.thp.write(), self.pp.write());
		let radius = 0.25 * (layout.nx.min(layout.ny) as f32) * dx.min(dy);
		let bubble_level = layout.levels / 4;
		for j in 0..layout.ny {
			for i in 0..layout.nx {
				let r = distance(i, j);
				for k in 0..layout.levels {
					let c = layout.index(k, i, j, 0);
					if let Some(reference) = &self.reference {
						up[c] = reference.u[k];
						vp[c] = reference.v[k];
					}
					let dk = (k as f32 - bubble_level as f32) * self.geometry.dz;
					let reach = r.hypot(dk) / radius;
					if reach < 1.0 {
						let warm = init.bubble * (std::f32::consts::FRAC_PI_2 * reach).cos().powi(2);
						thp[c] = warm;
						pp[c] = -0.1 * warm;
					}
				}
			}
		}
		self.soilw.fill(init.soil_moisture);
	}

	/// Runs one step of physics: zero tendencies, fill them, apply them, then
	/// accumulate time averages.
	pub fn advance(&self, dt: f32) {
		self.tend.zero();
		advection::advect(self);
		pgf::pressure_gradient(self);
		buoyancy::buoyancy(self);
		self.apply_tendencies(dt);
		self.accumulate_means(f64::from(dt));
	}

	/// Adds `dt` times each tendency to its prognostic field.
	pub fn apply_tendencies(&self, dt: f32) {
		for (field, tendency) in [(&self.up, &self.tend.ut), (&self.vp, &self.tend.vt), (&self.wp, &self.tend.wt), (&self.thp, &self.tend.tht)] {
			let tendency = tendency.read();
			for (value, rate) in field.write().iter_mut().zip(tendency.iter()) {
				*value += dt * rate;
			}
		}
	}

	/// Adds the current state of every time-averaged field to its accumulator.
	pub fn accumulate_means(&self, dt: f64) {
		self.soilw_mean.accumulate_from(&self.soilw, dt);
		self.diagnostics.accumulate_means(dt);
	}

	fn state_fields(&self) -> [&Field; 7] {
		[&self.up, &self.vp, &self.wp, &self.pp, &self.thp, &self.topt, &self.soilw]
	}
}

#[cfg(test)]
mod tests;
