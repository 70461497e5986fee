use cirrus_registry::{DescriptorError, RegistryError};

/// Error setting up or registering a grid's physics state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
	#[error(transparent)]
	Descriptor(#[from] DescriptorError),

	#[error(transparent)]
	Registry(#[from] RegistryError),

	#[error("grid {grid} is {nx}x{ny}x{nz}; physics needs at least 3 points in each direction")]
	TooSmall { grid: usize, nx: usize, ny: usize, nz: usize },

	#[error("grid {grid}: reference state has {actual} levels, expected {expected}")]
	ReferenceLevels { grid: usize, expected: usize, actual: usize },
}
