//! Per-grid variable registry.
//!
//! # Role
//!
//! Maps each allocated field of one grid to its storage, point count, shape
//! class and intents. The output/sync driver walks it every cycle through
//! [`VariableRegistry::entries_matching`].
//!
//! # Invariants
//!
//! - Names are unique within one registry; registering a name again replaces
//!   the entry in place, keeping its position in registration order.
//! - Entries hold non-owning references. Owners unregister before releasing
//!   storage; [`VariableRegistry::check_live`] detects a violation.
//! - Nested grids have separate registries, so the same name may appear once
//!   per grid.

use indexmap::IndexMap;

use crate::descriptor::FieldDescriptor;
use crate::dim::DimClass;
use crate::error::RegistryError;
use crate::field::{Field, FieldRef, MeanBuffer, MeanRef};
use crate::intent::{Intent, IntentFlags};

/// Longest field name accepted by a registry.
pub const MAX_FIELD_NAME_LEN: usize = 32;

/// Normalizes and checks a field name.
pub(crate) fn validate_name(name: &str) -> Result<String, RegistryError> {
	let name = name.trim();
	if name.is_empty() {
		return Err(RegistryError::EmptyName);
	}
	if name.chars().count() > MAX_FIELD_NAME_LEN {
		return Err(RegistryError::NameTooLong { name: name.to_string(), max: MAX_FIELD_NAME_LEN });
	}
	Ok(name.to_ascii_uppercase())
}

/// One registered field.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
	pub name: String,
	pub len: usize,
	pub dim: DimClass,
	pub intent: IntentFlags,
	storage: FieldRef,
	mean: Option<MeanRef>,
}

impl RegistryEntry {
	/// The field's storage, if its owner still holds it.
	pub fn storage(&self) -> Option<Field> {
		self.storage.upgrade()
	}

	/// The field's accumulator, for time-averaged entries.
	pub fn mean(&self) -> Option<MeanBuffer> {
		self.mean.as_ref().and_then(MeanRef::upgrade)
	}

	pub fn has(&self, intent: Intent) -> bool {
		self.intent.contains(intent.as_set())
	}

	pub fn refers_to(&self, field: &Field) -> bool {
		self.storage.refers_to(field)
	}

	fn is_live(&self) -> bool {
		self.storage.is_live() && self.mean.as_ref().is_none_or(MeanRef::is_live)
	}
}

/// Result of a successful registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RegisterAction {
	/// Name was new; entry appended.
	Inserted,
	/// Name existed; entry replaced in place.
	Replaced,
}

/// Registry of one grid's fields, in registration order.
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
	grid: usize,
	entries: IndexMap<String, RegistryEntry>,
}

impl VariableRegistry {
	pub fn new(grid: usize) -> Self {
		Self { grid, entries: IndexMap::new() }
	}

	pub fn grid(&self) -> usize {
		self.grid
	}

	/// Registers a field without an accumulator.
	///
	/// # Errors
	///
	/// Fails if the name is empty or too long, if `len` differs from the
	/// storage length, or if `intent` includes [`IntentFlags::MEAN`], which needs
	/// [`Self::register_mean`].
	pub fn register(&mut self, name: &str, storage: &Field, len: usize, dim: DimClass, intent: IntentFlags) -> Result<RegisterAction, RegistryError> {
		self.insert(name, storage, None, len, dim, intent)
	}

	/// Registers a time-averaged field together with its accumulator.
	pub fn register_mean(
		&mut self,
		name: &str,
		storage: &Field,
		mean: &MeanBuffer,
		len: usize,
		dim: DimClass,
		intent: IntentFlags,
	) -> Result<RegisterAction, RegistryError> {
		self.insert(name, storage, Some(mean), len, dim, intent)
	}

	/// Registers a field described by `desc`, taking the point count from the storage.
	pub fn register_field(&mut self, desc: &FieldDescriptor, storage: &Field, mean: Option<&MeanBuffer>) -> Result<RegisterAction, RegistryError> {
		self.insert(&desc.name, storage, mean, storage.len(), desc.dim, desc.intent)
	}

	fn insert(
		&mut self,
		name: &str,
		storage: &Field,
		mean: Option<&MeanBuffer>,
		len: usize,
		dim: DimClass,
		intent: IntentFlags,
	) -> Result<RegisterAction, RegistryError> {
		let name = validate_name(name)?;
		let actual = storage.len();
		if actual != len {
			return Err(RegistryError::LengthMismatch { name, declared: len, actual });
		}
		match (intent.contains(IntentFlags::MEAN), mean) {
			(true, None) => return Err(RegistryError::MissingAccumulator(name)),
			(false, Some(_)) => return Err(RegistryError::UnexpectedAccumulator(name)),
			(true, Some(mean)) if mean.lock().len() != len => {
				let actual = mean.lock().len();
				return Err(RegistryError::LengthMismatch { name, declared: len, actual });
			}
			_ => {}
		}

		let entry = RegistryEntry {
			name: name.clone(),
			len,
			dim,
			intent,
			storage: storage.downgrade(),
			mean: mean.map(MeanBuffer::downgrade),
		};
		let action = match self.entries.insert(name.clone(), entry) {
			Some(_) => RegisterAction::Replaced,
			None => RegisterAction::Inserted,
		};
		tracing::debug!(grid = self.grid, name = %name, %dim, ?intent, len, ?action, "registered field");
		Ok(action)
	}

	/// Removes a field. Call before releasing its storage.
	pub fn unregister(&mut self, name: &str) -> Option<RegistryEntry> {
		let removed = self.entries.shift_remove(&name.trim().to_ascii_uppercase());
		if removed.is_some() {
			tracing::debug!(grid = self.grid, name, "unregistered field");
		}
		removed
	}

	pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
		self.entries.get(&name.trim().to_ascii_uppercase())
	}

	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> + Clone {
		self.entries.values()
	}

	/// Lazily yields entries whose intents satisfy `predicate`, in registration order.
	///
	/// The returned iterator is `Clone`, so a caller can walk the same
	/// selection more than once.
	pub fn entries_matching<P>(&self, predicate: P) -> impl Iterator<Item = &RegistryEntry> + Clone
	where
		P: Fn(IntentFlags) -> bool + Clone,
	{
		self.entries.values().filter(move |entry| predicate(entry.intent))
	}

	/// Entries carrying every flag in `flags`.
	pub fn entries_with(&self, flags: IntentFlags) -> impl Iterator<Item = &RegistryEntry> + Clone {
		self.entries_matching(move |intent| intent.contains(flags))
	}

	/// Fails on the first entry whose storage or accumulator has been released.
	pub fn check_live(&self) -> Result<(), RegistryError> {
		match self.entries.values().find(|entry| !entry.is_live()) {
			Some(entry) => Err(RegistryError::Dangling { grid: self.grid, name: entry.name.clone() }),
			None => Ok(()),
		}
	}
}
