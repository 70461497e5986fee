//! Dimensionality classes of registered fields.

use std::fmt;

/// Shape class of a field, identified in descriptors by a numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimClass {
	/// `(x, y)` surface field.
	Horizontal2d,
	/// `(z, x, y)` atmospheric field.
	Atmos3d,
	/// `(soil level, x, y, patch)`.
	Soil4d,
	/// `(snow level, x, y, patch)`.
	Snow4d,
	/// `(z, x, y, size bin)`.
	Bin4d,
	/// `(z, x, y, aerosol species)`.
	Aerosol4d,
	/// `(ocean level, x, y)`.
	Ocean3d,
}

impl DimClass {
	pub const ALL: [DimClass; 7] = [
		DimClass::Horizontal2d,
		DimClass::Atmos3d,
		DimClass::Soil4d,
		DimClass::Snow4d,
		DimClass::Bin4d,
		DimClass::Aerosol4d,
		DimClass::Ocean3d,
	];

	pub const fn code(self) -> u8 {
		match self {
			Self::Horizontal2d => 2,
			Self::Atmos3d => 3,
			Self::Soil4d => 4,
			Self::Snow4d => 5,
			Self::Bin4d => 6,
			Self::Aerosol4d => 7,
			Self::Ocean3d => 8,
		}
	}

	pub fn from_code(code: u8) -> Option<Self> {
		Self::ALL.into_iter().find(|dim| dim.code() == code)
	}

	/// Number of points a field of this class holds on a grid of `dims`.
	pub fn points(self, dims: &GridDims) -> usize {
		self.layout(dims).points()
	}

	/// Memory layout of a field of this class on a grid of `dims`.
	pub fn layout(self, dims: &GridDims) -> Layout {
		let (levels, outer) = match self {
			Self::Horizontal2d => (1, 1),
			Self::Atmos3d => (dims.nz, 1),
			Self::Soil4d => (dims.nsoil, dims.npatch),
			Self::Snow4d => (dims.nsnow, dims.npatch),
			Self::Bin4d => (dims.nz, dims.nbins),
			Self::Aerosol4d => (dims.nz, dims.naero),
			Self::Ocean3d => (dims.nocean, 1),
		};
		Layout { levels, nx: dims.nx, ny: dims.ny, outer }
	}
}

impl fmt::Display for DimClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Self::Horizontal2d => "2d",
			Self::Atmos3d => "3d",
			Self::Soil4d => "4d-soil",
			Self::Snow4d => "4d-snow",
			Self::Bin4d => "4d-bin",
			Self::Aerosol4d => "4d-aerosol",
			Self::Ocean3d => "3d-ocean",
		};
		f.write_str(label)
	}
}

/// Extents of one grid's subdomain, including halo points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
	pub nx: usize,
	pub ny: usize,
	pub nz: usize,
	pub nsoil: usize,
	pub nsnow: usize,
	pub npatch: usize,
	pub nbins: usize,
	pub naero: usize,
	pub nocean: usize,
}

impl GridDims {
	/// Atmosphere-only extents; the other level counts are one.
	pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
		Self { nx, ny, nz, nsoil: 1, nsnow: 1, npatch: 1, nbins: 1, naero: 1, nocean: 1 }
	}
}

/// Index arithmetic for a `(level, x, y, outer)` field.
///
/// Levels vary fastest, then x, then y, then the outer dimension (patch, bin or
/// species).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
	pub levels: usize,
	pub nx: usize,
	pub ny: usize,
	pub outer: usize,
}

impl Layout {
	pub fn points(&self) -> usize {
		self.levels * self.nx * self.ny * self.outer
	}

	#[inline]
	pub fn index(&self, k: usize, i: usize, j: usize, m: usize) -> usize {
		k + self.levels * (i + self.nx * (j + self.ny * m))
	}
}
