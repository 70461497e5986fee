//! Thermal buoyancy acting on vertical momentum.

use crate::diag::Contributions;
use crate::diagnostics::Term;
use crate::state::{GRAVITY, GridState};
use crate::stencil::interior;

/// Base-state potential temperature used when the grid has no reference state, K.
pub const DEFAULT_THETA: f32 = 300.0;

pub fn buoyancy(state: &GridState) {
	let layout = state.layout();
	let th = state.thp.read();
	let mut wt_values = state.tend.wt.write();
	let mut wt = Contributions::new(&mut wt_values, state.diagnostics.target(Term::WtBuoy));

	for (k, i, j) in interior(layout) {
		let c = layout.index(k, i, j, 0);
		let theta0 = state.reference().map_or(DEFAULT_THETA, |reference| reference.theta[k]);
		wt.add(c, GRAVITY * th[c] / theta0);
	}
}
