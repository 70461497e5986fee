//! Per-invocation diagnostic capture.
//!
//! # Role
//!
//! A routine that adds to a shared tendency does so through [`Contributions`].
//! When the routine's diagnostic is enabled the handle carries a
//! [`DiagnosticBuffer`] that receives the same terms at the same indices. When
//! it is disabled nothing is allocated and each term costs one branch.
//!
//! # Invariants
//!
//! - A buffer starts at zero on every invocation.
//! - Dropping a buffer overwrites its target field with the buffer's values, so
//!   every exit path of a routine, early returns included, commits the total of
//!   that invocation. Earlier invocations are not summed in.
//! - A buffer borrows its target and cannot outlive the routine call.

use cirrus_registry::Field;

/// Zeroed scratch copy of one diagnostic field, written back on drop.
#[derive(Debug)]
pub struct DiagnosticBuffer<'a> {
	target: &'a Field,
	values: Vec<f32>,
}

impl<'a> DiagnosticBuffer<'a> {
	pub fn new(target: &'a Field) -> Self {
		Self { values: vec![0.0; target.len()], target }
	}

	#[inline]
	pub fn add(&mut self, index: usize, value: f32) {
		self.values[index] += value;
	}

	pub fn values(&self) -> &[f32] {
		&self.values
	}

	/// Writes the buffer to its target now instead of at scope exit.
	pub fn commit(self) {
		drop(self);
	}
}

impl Drop for DiagnosticBuffer<'_> {
	fn drop(&mut self) {
		self.target.copy_from(&self.values);
	}
}

/// Adds terms to a tendency array, mirroring them into a diagnostic when one
/// is attached.
#[derive(Debug)]
pub struct Contributions<'a> {
	tendency: &'a mut [f32],
	diagnostic: Option<DiagnosticBuffer<'a>>,
}

impl<'a> Contributions<'a> {
	/// `target` is the routine's registered diagnostic field, or `None` when the
	/// diagnostic is disabled.
	pub fn new(tendency: &'a mut [f32], target: Option<&'a Field>) -> Self {
		let diagnostic = target.map(DiagnosticBuffer::new);
		if let Some(buffer) = &diagnostic {
			debug_assert_eq!(buffer.values.len(), tendency.len(), "diagnostic and tendency lengths differ");
		}
		Self { tendency, diagnostic }
	}

	#[inline]
	pub fn add(&mut self, index: usize, value: f32) {
		self.tendency[index] += value;
		if let Some(buffer) = &mut self.diagnostic {
			buffer.add(index, value);
		}
	}

	pub fn is_instrumented(&self) -> bool {
		self.diagnostic.is_some()
	}
}
