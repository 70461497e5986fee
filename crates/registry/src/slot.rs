//! Optional field slots.
//!
//! A field that exists only under a configuration flag lives in an
//! [`OptionalField`]. Its presence is the single source of truth: enabling the
//! slot allocates then registers, disabling unregisters then releases, so a
//! registry entry and its storage always appear and disappear together.

use crate::descriptor::FieldDescriptor;
use crate::error::RegistryError;
use crate::field::{Field, MeanBuffer};
use crate::intent::IntentFlags;
use crate::registry::VariableRegistry;

/// Storage of a present optional field.
#[derive(Debug, Clone)]
pub struct Allocated {
	pub field: Field,
	pub mean: Option<MeanBuffer>,
}

/// A conditionally allocated, conditionally registered field.
#[derive(Debug)]
pub struct OptionalField {
	desc: FieldDescriptor,
	len: usize,
	allocated: Option<Allocated>,
}

impl OptionalField {
	/// An absent slot that allocates `len` points when enabled.
	pub fn new(desc: FieldDescriptor, len: usize) -> Self {
		Self { desc, len, allocated: None }
	}

	pub fn descriptor(&self) -> &FieldDescriptor {
		&self.desc
	}

	pub fn is_present(&self) -> bool {
		self.allocated.is_some()
	}

	pub fn field(&self) -> Option<&Field> {
		self.allocated.as_ref().map(|a| &a.field)
	}

	pub fn mean(&self) -> Option<&MeanBuffer> {
		self.allocated.as_ref().and_then(|a| a.mean.as_ref())
	}

	/// Allocates and registers the field if it is absent.
	pub fn enable(&mut self, registry: &mut VariableRegistry) -> Result<&Field, RegistryError> {
		let allocated = match self.allocated.take() {
			Some(existing) => existing,
			None => {
				let field = Field::zeros(self.len);
				let mean = self.desc.intent.contains(IntentFlags::MEAN).then(|| MeanBuffer::new(self.len));
				registry.register_field(&self.desc, &field, mean.as_ref())?;
				Allocated { field, mean }
			}
		};
		Ok(&self.allocated.insert(allocated).field)
	}

	/// Unregisters and releases the field if it is present.
	pub fn disable(&mut self, registry: &mut VariableRegistry) {
		if self.allocated.is_some() {
			registry.unregister(&self.desc.name);
			self.allocated = None;
		}
	}

	/// Brings presence in line with `enabled`.
	pub fn set_enabled(&mut self, enabled: bool, registry: &mut VariableRegistry) -> Result<(), RegistryError> {
		if enabled {
			self.enable(registry)?;
		} else {
			self.disable(registry);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
