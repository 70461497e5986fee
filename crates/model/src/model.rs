//! The model driver.
//!
//! # Role
//!
//! [`Model`] owns the state and the variable registry of every grid. One
//! [`Model::step`] advances each grid by a long timestep, halo-exchanges the
//! registered fields and then runs one output cycle.
//!
//! # Invariants
//!
//! - `states[g]` registers into `registries[g]` and nowhere else.
//! - Every state is released from its registry before the model drops.

use cirrus_output::{CycleReport, FieldSink, HaloExchange, OutputDriver};
use cirrus_physics::GridState;
use cirrus_registry::{GridDims, VariableRegistry};
use tracing::{debug, info};

use crate::config::ModelConfig;
use crate::error::ModelError;

/// Output counts accumulated over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
	pub steps: usize,
	pub history: usize,
	pub lite: usize,
	pub mean: usize,
}

impl RunSummary {
	fn add(&mut self, report: CycleReport) {
		self.history += report.history;
		self.lite += report.lite;
		self.mean += report.mean;
	}
}

#[derive(Debug)]
pub struct Model {
	config: ModelConfig,
	states: Vec<GridState>,
	registries: Vec<VariableRegistry>,
	driver: OutputDriver,
	time: f64,
	steps: usize,
}

impl Model {
	/// Allocates, initializes and registers every grid.
	///
	/// # Errors
	///
	/// Fails if a grid cannot be built or if `LITE_VARS` names a field that no
	/// grid registers for lite output.
	pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
		let ngrids = config.grids.ngrids();
		let mut states = Vec::with_capacity(ngrids);
		let mut registries = Vec::with_capacity(ngrids);

		for grid in 0..ngrids {
			let dims = config.grids.dims(grid);
			let geometry = config.grids.geometry(grid);
			let mut state = GridState::new(grid, dims, geometry, config.tendency)?;
			if let Some(reference) = config.sounding.reference_state(dims.nz, f64::from(geometry.dz)) {
				state.set_reference(reference)?;
			}
			state.initialize(&config.initial);

			let mut registry = VariableRegistry::new(grid);
			state.register(&mut registry)?;
			info!(grid, nx = dims.nx, ny = dims.ny, nz = dims.nz, dx = geometry.dx, fields = registry.len(), "grid ready");
			states.push(state);
			registries.push(registry);
		}

		let driver = OutputDriver::new(config.output.lite_selection(), config.output.schedule());
		let unmatched = driver.lite().unmatched(&registries);
		if !unmatched.is_empty() {
			let names = unmatched.into_iter().map(str::to_string).collect();
			return Err(ModelError::LiteVars { names });
		}

		Ok(Self { config, states, registries, driver, time: 0.0, steps: 0 })
	}

	pub fn config(&self) -> &ModelConfig {
		&self.config
	}

	/// Simulated seconds since the start of the run.
	pub fn time(&self) -> f64 {
		self.time
	}

	pub fn states(&self) -> &[GridState] {
		&self.states
	}

	pub fn registries(&self) -> &[VariableRegistry] {
		&self.registries
	}

	pub fn grid_dims(&self) -> Vec<GridDims> {
		self.states.iter().map(|state| *state.dims()).collect()
	}

	/// Switches momentum tendency capture on or off on every grid.
	pub fn set_momentum_diagnostics(&mut self, enabled: bool) -> Result<(), ModelError> {
		for (state, registry) in self.states.iter_mut().zip(&mut self.registries) {
			state.diagnostics.set_enabled(enabled, registry).map_err(cirrus_physics::StateError::from)?;
		}
		debug!(enabled, "momentum diagnostics toggled");
		Ok(())
	}

	/// Runs the output cycle for the current time without stepping.
	pub fn write_output(&self, sink: &mut dyn FieldSink) -> Result<CycleReport, ModelError> {
		Ok(self.driver.output_cycle(&self.registries, self.time, self.config.grids.dtlong, sink)?)
	}

	/// Advances every grid by one long timestep, then exchanges and writes.
	pub fn step(&mut self, halo: &mut dyn HaloExchange, sink: &mut dyn FieldSink) -> Result<CycleReport, ModelError> {
		let dt = self.config.grids.dtlong;
		for state in &self.states {
			state.advance(dt as f32);
		}
		let exchanged = self.driver.exchange(&self.registries, halo)?;
		self.steps += 1;
		self.time = self.steps as f64 * dt;
		debug!(step = self.steps, time = self.time, primary = exchanged.primary, tendency = exchanged.tendency, "step complete");
		self.write_output(sink)
	}

	/// Writes the initial output, then steps `steps` times, or until `TIMMAX`
	/// when `steps` is `None`.
	pub fn run(&mut self, steps: Option<usize>, halo: &mut dyn HaloExchange, sink: &mut dyn FieldSink) -> Result<RunSummary, ModelError> {
		let steps = steps.unwrap_or_else(|| self.config.grids.steps());
		let mut summary = RunSummary::default();
		if self.steps == 0 {
			summary.add(self.write_output(sink)?);
		}
		info!(steps, dt = self.config.grids.dtlong, experiment = %self.config.output.expnme, "run starting");
		for _ in 0..steps {
			summary.add(self.step(halo, sink)?);
			summary.steps += 1;
		}
		Ok(summary)
	}
}

impl Drop for Model {
	fn drop(&mut self) {
		for (state, registry) in self.states.drain(..).zip(&mut self.registries) {
			state.release(registry);
		}
	}
}
