//! Halo-exchange seam and single-unit implementations.
//!
//! # Role
//!
//! The driver posts one [`ExchangeField`] per synchronized entry and then calls
//! [`HaloExchange::wait`] for that class. A distributed implementation blocks in
//! `wait` until every neighbor has sent and received; the next integration step
//! may only read halo values after it returns.
//!
//! # Invariants
//!
//! - Primary fields use [`Stencil::Faces`]; tendency variants use
//!   [`Stencil::FacesAndCorners`].
//! - On each grid, every primary exchange completes before the first tendency
//!   exchange is posted.

use cirrus_registry::{DimClass, ExchangeClass, Field, GridDims, Layout};

use crate::error::BoxError;

/// Neighbor set a halo exchange fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stencil {
	/// Edge neighbors only.
	Faces,
	/// Edge and diagonal neighbors.
	FacesAndCorners,
}

impl From<ExchangeClass> for Stencil {
	fn from(class: ExchangeClass) -> Self {
		match class {
			ExchangeClass::Primary => Self::Faces,
			ExchangeClass::Tendency => Self::FacesAndCorners,
		}
	}
}

/// One field posted for exchange.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeField<'a> {
	pub grid: usize,
	pub name: &'a str,
	pub dim: DimClass,
	pub class: ExchangeClass,
	pub stencil: Stencil,
	pub field: &'a Field,
}

/// Synchronizes subdomain boundary values with neighboring units.
pub trait HaloExchange {
	/// Posts the exchange of one field. Implementations may complete it
	/// immediately or defer it to [`Self::wait`].
	fn exchange(&mut self, field: ExchangeField<'_>) -> Result<(), BoxError>;

	/// Blocks until every exchange of `class` posted on `grid` has completed.
	fn wait(&mut self, _grid: usize, _class: ExchangeClass) -> Result<(), BoxError> {
		Ok(())
	}
}

/// Error raised by [`PeriodicHalo`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HaloError {
	#[error("no extents known for grid {0}")]
	UnknownGrid(usize),

	#[error("field {name} holds {actual} points but its layout needs {expected}")]
	Shape { name: String, expected: usize, actual: usize },

	#[error("grid {grid} is {nx}x{ny}; periodic wrapping needs at least 3x3 points")]
	TooSmall { grid: usize, nx: usize, ny: usize },
}

/// Wraps a single subdomain periodically in x and y with a one-point halo.
///
/// Stands in for transport when the whole domain lives on one unit.
#[derive(Debug, Clone, Default)]
pub struct PeriodicHalo {
	dims: Vec<GridDims>,
}

impl PeriodicHalo {
	/// `dims[g]` holds the extents of grid `g`.
	pub fn new(dims: Vec<GridDims>) -> Self {
		Self { dims }
	}
}

impl HaloExchange for PeriodicHalo {
	fn exchange(&mut self, field: ExchangeField<'_>) -> Result<(), BoxError> {
		let dims = self.dims.get(field.grid).ok_or(HaloError::UnknownGrid(field.grid))?;
		if dims.nx < 3 || dims.ny < 3 {
			return Err(HaloError::TooSmall { grid: field.grid, nx: dims.nx, ny: dims.ny }.into());
		}
		let layout = field.dim.layout(dims);
		let mut values = field.field.write();
		if values.len() != layout.points() {
			return Err(HaloError::Shape { name: field.name.to_string(), expected: layout.points(), actual: values.len() }.into());
		}
		wrap(&mut values, layout, field.stencil);
		Ok(())
	}
}

/// Copies interior edges into the opposite halo rows and columns.
fn wrap(values: &mut [f32], layout: Layout, stencil: Stencil) {
	let Layout { levels, nx, ny, outer } = layout;
	for m in 0..outer {
		for j in 1..ny - 1 {
			for k in 0..levels {
				values[layout.index(k, 0, j, m)] = values[layout.index(k, nx - 2, j, m)];
				values[layout.index(k, nx - 1, j, m)] = values[layout.index(k, 1, j, m)];
			}
		}
		// Rows copied over the full x range pick up the corners filled above.
		let columns = match stencil {
			Stencil::Faces => 1..nx - 1,
			Stencil::FacesAndCorners => 0..nx,
		};
		for i in columns {
			for k in 0..levels {
				values[layout.index(k, i, 0, m)] = values[layout.index(k, i, ny - 2, m)];
				values[layout.index(k, i, ny - 1, m)] = values[layout.index(k, i, 1, m)];
			}
		}
	}
}

/// Call observed by [`RecordingExchange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeEvent {
	Exchange { grid: usize, name: String, class: ExchangeClass, stencil: Stencil },
	Wait { grid: usize, class: ExchangeClass },
}

/// Exchange that records the calls it receives and touches no values.
#[derive(Debug, Default)]
pub struct RecordingExchange {
	pub events: Vec<ExchangeEvent>,
}

impl RecordingExchange {
	pub fn new() -> Self {
		Self::default()
	}

	/// Names exchanged on `grid`, in posting order.
	pub fn exchanged(&self, grid: usize) -> Vec<&str> {
		self.events
			.iter()
			.filter_map(|event| match event {
				ExchangeEvent::Exchange { grid: g, name, .. } if *g == grid => Some(name.as_str()),
				_ => None,
			})
			.collect()
	}
}

impl HaloExchange for RecordingExchange {
	fn exchange(&mut self, field: ExchangeField<'_>) -> Result<(), BoxError> {
		self.events.push(ExchangeEvent::Exchange {
			grid: field.grid,
			name: field.name.to_string(),
			class: field.class,
			stencil: field.stencil,
		});
		Ok(())
	}

	fn wait(&mut self, grid: usize, class: ExchangeClass) -> Result<(), BoxError> {
		self.events.push(ExchangeEvent::Wait { grid, class });
		Ok(())
	}
}
