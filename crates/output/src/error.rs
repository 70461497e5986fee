use cirrus_registry::{ExchangeClass, RegistryError};

use crate::sink::Stream;

/// Error type returned by sink and exchange collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error raised while driving output or halo exchange.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
	#[error(transparent)]
	Registry(#[from] RegistryError),

	#[error("{stream} output at t={time}s: {source}")]
	Stream { stream: Stream, time: f64, source: BoxError },

	#[error("{stream} output of {name} on grid {grid} failed: {source}")]
	Write { stream: Stream, grid: usize, name: String, source: BoxError },

	#[error("halo exchange of {name} on grid {grid} failed: {source}")]
	Exchange { grid: usize, name: String, source: BoxError },

	#[error("grid {grid}: {class:?} halo exchange did not complete: {source}")]
	Wait { grid: usize, class: ExchangeClass, source: BoxError },
}
