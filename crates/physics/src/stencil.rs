use cirrus_registry::Layout;

/// Indices of a point and its six neighbors in an atmospheric field.
///
/// Vertical neighbors are `None` on the bottom and top levels.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Neighbors {
	pub c: usize,
	pub xm: usize,
	pub xp: usize,
	pub ym: usize,
	pub yp: usize,
	pub zm: Option<usize>,
	pub zp: Option<usize>,
}

impl Neighbors {
	pub fn at(layout: &Layout, k: usize, i: usize, j: usize) -> Self {
		let vertical = k > 0 && k + 1 < layout.levels;
		Self {
			c: layout.index(k, i, j, 0),
			xm: layout.index(k, i - 1, j, 0),
			xp: layout.index(k, i + 1, j, 0),
			ym: layout.index(k, i, j - 1, 0),
			yp: layout.index(k, i, j + 1, 0),
			zm: vertical.then(|| layout.index(k - 1, i, j, 0)),
			zp: vertical.then(|| layout.index(k + 1, i, j, 0)),
		}
	}
}

/// Every `(k, i, j)` that is not a horizontal halo point.
pub(crate) fn interior(layout: Layout) -> impl Iterator<Item = (usize, usize, usize)> {
	(1..layout.ny.saturating_sub(1))
		.flat_map(move |j| (1..layout.nx.saturating_sub(1)).flat_map(move |i| (0..layout.levels).map(move |k| (k, i, j))))
}
