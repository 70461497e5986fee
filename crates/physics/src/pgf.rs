//! Pressure-gradient force.
//!
//! Three branches add terms:
//!
//! - the horizontal and vertical gradient of the pressure perturbation, always;
//! - a terrain-following correction of the horizontal force where the surface
//!   slopes, decaying with height;
//! - with a reference state, base-state density in place of unit density and
//!   a compressibility term on vertical momentum.
//!
//! A grid with no pressure perturbation returns before any term is added. Its
//! diagnostics are still overwritten, with zeros.

use crate::diag::Contributions;
use crate::diagnostics::Term;
use crate::state::{GRAVITY, GridState};
use crate::stencil::{Neighbors, interior};

/// Squared speed of sound, m² s⁻².
pub const SOUND_SPEED_SQ: f32 = 340.0 * 340.0;

pub fn pressure_gradient(state: &GridState) {
	let layout = state.layout();
	let surface = cirrus_registry::DimClass::Horizontal2d.layout(state.dims());
	let geometry = *state.geometry();
	let diags = &state.diagnostics;

	let (mut ut_values, mut vt_values, mut wt_values) = (state.tend.ut.write(), state.tend.vt.write(), state.tend.wt.write());
	let mut ut = Contributions::new(&mut ut_values, diags.target(Term::UtPgf));
	let mut vt = Contributions::new(&mut vt_values, diags.target(Term::VtPgf));
	let mut wt = Contributions::new(&mut wt_values, diags.target(Term::WtPgf));

	let p = state.pp.read();
	if p.iter().all(|&value| value == 0.0) {
		tracing::trace!(grid = state.grid(), "no pressure perturbation");
		return;
	}

	let topt = state.topt.read();
	let terrain = topt.iter().any(|&height| height != 0.0);
	let reference = state.reference();
	let depth = layout.levels as f32 * geometry.dz;

	for (k, i, j) in interior(layout) {
		let n = Neighbors::at(&layout, k, i, j);
		let inv_rho = reference.map_or(1.0, |reference| 1.0 / reference.density[k]);

		ut.add(n.c, -inv_rho * (p[n.xp] - p[n.xm]) / (2.0 * geometry.dx));
		vt.add(n.c, -inv_rho * (p[n.yp] - p[n.ym]) / (2.0 * geometry.dy));

		if let (Some(zm), Some(zp)) = (n.zm, n.zp) {
			let dpdz = (p[zp] - p[zm]) / (2.0 * geometry.dz);
			wt.add(n.c, -inv_rho * dpdz);

			if terrain {
				let slope_x = (topt[surface.index(0, i + 1, j, 0)] - topt[surface.index(0, i - 1, j, 0)]) / (2.0 * geometry.dx);
				let slope_y = (topt[surface.index(0, i, j + 1, 0)] - topt[surface.index(0, i, j - 1, 0)]) / (2.0 * geometry.dy);
				let decay = (1.0 - (k as f32 + 0.5) * geometry.dz / depth).max(0.0);
				if slope_x != 0.0 {
					ut.add(n.c, inv_rho * dpdz * slope_x * decay);
				}
				if slope_y != 0.0 {
					vt.add(n.c, inv_rho * dpdz * slope_y * decay);
				}
			}
		}

		if reference.is_some() {
			wt.add(n.c, -GRAVITY * p[n.c] * inv_rho / SOUND_SPEED_SQ);
		}
	}
}
