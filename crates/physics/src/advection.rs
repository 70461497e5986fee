//! Momentum and potential temperature advection.
//!
//! Centered differences in x, y and z, each added as its own term. The vertical
//! term is skipped on the bottom and top levels.

use crate::diag::Contributions;
use crate::diagnostics::Term;
use crate::state::{Geometry, GridState};
use crate::stencil::{Neighbors, interior};

pub fn advect(state: &GridState) {
	let layout = state.layout();
	let geometry = *state.geometry();
	let (u, v, w, th) = (state.up.read(), state.vp.read(), state.wp.read(), state.thp.read());
	let diags = &state.diagnostics;

	let (mut ut_values, mut vt_values, mut wt_values, mut tht_values) =
		(state.tend.ut.write(), state.tend.vt.write(), state.tend.wt.write(), state.tend.tht.write());
	let mut ut = Contributions::new(&mut ut_values, diags.target(Term::UtAdv));
	let mut vt = Contributions::new(&mut vt_values, diags.target(Term::VtAdv));
	let mut wt = Contributions::new(&mut wt_values, diags.target(Term::WtAdv));
	let mut tht = Contributions::new(&mut tht_values, None);

	for (k, i, j) in interior(layout) {
		let n = Neighbors::at(&layout, k, i, j);
		let wind = [u[n.c], v[n.c], w[n.c]];
		for (out, field) in [(&mut ut, &u), (&mut vt, &v), (&mut wt, &w), (&mut tht, &th)] {
			for term in terms(field, &n, wind, &geometry).into_iter().flatten() {
				out.add(n.c, term);
			}
		}
	}
}

/// `-u ∂f/∂x`, `-v ∂f/∂y` and, away from the lid and surface, `-w ∂f/∂z`.
fn terms(f: &[f32], n: &Neighbors, [u, v, w]: [f32; 3], geometry: &Geometry) -> [Option<f32>; 3] {
	let vertical = match (n.zm, n.zp) {
		(Some(zm), Some(zp)) => Some(-w * (f[zp] - f[zm]) / (2.0 * geometry.dz)),
		_ => None,
	};
	[Some(-u * (f[n.xp] - f[n.xm]) / (2.0 * geometry.dx)), Some(-v * (f[n.yp] - f[n.ym]) / (2.0 * geometry.dy)), vertical]
}
