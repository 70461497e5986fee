//! Field storage and time-average accumulators.
//!
//! # Role
//!
//! The physics module that declares a field owns its [`Field`]. The registry
//! keeps only a [`FieldRef`], so dropping the owner releases the storage and any
//! later access through the registry sees `None` instead of freed memory.
//!
//! # Invariants
//!
//! - A field's length is fixed at allocation.
//! - A [`MeanAccumulator`] is zero, with zero elapsed time, right after a flush.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Owning handle to a field's values.
#[derive(Debug, Clone)]
pub struct Field {
	data: Arc<RwLock<Box<[f32]>>>,
}

impl Field {
	pub fn zeros(len: usize) -> Self {
		Self::from_vec(vec![0.0; len])
	}

	pub fn from_vec(values: Vec<f32>) -> Self {
		Self { data: Arc::new(RwLock::new(values.into_boxed_slice())) }
	}

	pub fn len(&self) -> usize {
		self.data.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn read(&self) -> RwLockReadGuard<'_, Box<[f32]>> {
		self.data.read()
	}

	pub fn write(&self) -> RwLockWriteGuard<'_, Box<[f32]>> {
		self.data.write()
	}

	/// Overwrites every value from `values`, which must have the field's length.
	pub fn copy_from(&self, values: &[f32]) {
		self.data.write().copy_from_slice(values);
	}

	pub fn fill(&self, value: f32) {
		self.data.write().fill(value);
	}

	pub fn downgrade(&self) -> FieldRef {
		FieldRef(Arc::downgrade(&self.data))
	}
}

/// Non-owning reference held by the registry.
#[derive(Debug, Clone)]
pub struct FieldRef(Weak<RwLock<Box<[f32]>>>);

impl FieldRef {
	/// Returns the field if its owner still holds it.
	pub fn upgrade(&self) -> Option<Field> {
		self.0.upgrade().map(|data| Field { data })
	}

	pub fn is_live(&self) -> bool {
		self.0.strong_count() > 0
	}

	/// Whether this reference points at `field`'s storage.
	pub fn refers_to(&self, field: &Field) -> bool {
		std::ptr::eq(self.0.as_ptr(), Arc::as_ptr(&field.data))
	}
}

/// Time-weighted running sum of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanAccumulator {
	sum: Vec<f64>,
	elapsed: f64,
}

impl MeanAccumulator {
	pub fn new(len: usize) -> Self {
		Self { sum: vec![0.0; len], elapsed: 0.0 }
	}

	pub fn len(&self) -> usize {
		self.sum.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sum.is_empty()
	}

	/// Adds `values` weighted by the sub-step length `dt` (seconds).
	pub fn accumulate(&mut self, values: &[f32], dt: f64) {
		debug_assert_eq!(values.len(), self.sum.len(), "accumulator length mismatch");
		for (sum, &value) in self.sum.iter_mut().zip(values) {
			*sum += f64::from(value) * dt;
		}
		self.elapsed += dt;
	}

	/// Seconds accumulated since the last flush.
	pub fn elapsed(&self) -> f64 {
		self.elapsed
	}

	pub fn sum(&self) -> &[f64] {
		&self.sum
	}

	/// Returns the time average and resets the sum and clock.
	///
	/// Returns `None` without resetting when no time has elapsed.
	pub fn flush(&mut self) -> Option<Vec<f32>> {
		if self.elapsed <= 0.0 {
			return None;
		}
		let elapsed = self.elapsed;
		let mean = self.sum.iter().map(|&sum| (sum / elapsed) as f32).collect();
		self.reset();
		Some(mean)
	}

	pub fn reset(&mut self) {
		self.sum.fill(0.0);
		self.elapsed = 0.0;
	}
}

/// Owning handle to a field's [`MeanAccumulator`].
#[derive(Debug, Clone)]
pub struct MeanBuffer {
	acc: Arc<Mutex<MeanAccumulator>>,
}

impl MeanBuffer {
	pub fn new(len: usize) -> Self {
		Self { acc: Arc::new(Mutex::new(MeanAccumulator::new(len))) }
	}

	pub fn lock(&self) -> MutexGuard<'_, MeanAccumulator> {
		self.acc.lock()
	}

	/// Adds the current values of `field`, weighted by `dt`.
	pub fn accumulate_from(&self, field: &Field, dt: f64) {
		self.acc.lock().accumulate(&field.read(), dt);
	}

	pub fn downgrade(&self) -> MeanRef {
		MeanRef(Arc::downgrade(&self.acc))
	}
}

/// Non-owning reference to an accumulator, held by the registry.
#[derive(Debug, Clone)]
pub struct MeanRef(Weak<Mutex<MeanAccumulator>>);

impl MeanRef {
	pub fn upgrade(&self) -> Option<MeanBuffer> {
		self.0.upgrade().map(|acc| MeanBuffer { acc })
	}

	pub fn is_live(&self) -> bool {
		self.0.strong_count() > 0
	}
}
