//! Resolved namelist values.

use indexmap::IndexMap;

use crate::catalog::Catalog;
use crate::error::LookupError;
use crate::param::{ParamDef, Value};

/// One parameter after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
	pub group: String,
	pub def: ParamDef,
	pub values: Vec<Value>,
	/// Number of values written from the text. Zero means every slot holds its default.
	pub assigned: usize,
	/// Next array slot to fill.
	pub(crate) cursor: usize,
}

impl Resolved {
	fn new(group: &str, def: &ParamDef) -> Self {
		Self {
			group: group.to_string(),
			def: def.clone(),
			values: vec![def.default.clone(); def.len],
			assigned: 0,
			cursor: 0,
		}
	}

	pub fn was_set(&self) -> bool {
		self.assigned > 0
	}

	/// Number of leading slots filled from the text.
	///
	/// For an array this is how many values the text supplied; a scalar counts
	/// as one slot once set.
	pub fn filled(&self) -> usize {
		if self.def.is_array() { self.cursor } else { usize::from(self.was_set()) }
	}
}

/// Immutable snapshot of every declared parameter.
///
/// Built by [`crate::parse`]. Parameters absent from the text hold their
/// compiled-in defaults. Lookups ignore case.
#[derive(Debug, Clone, PartialEq)]
pub struct Namelist {
	params: IndexMap<String, Resolved>,
}

impl Namelist {
	/// Snapshot with every parameter at its default.
	pub fn defaults(catalog: &Catalog) -> Self {
		let params = catalog
			.groups()
			.iter()
			.flat_map(|group| group.params.iter().map(move |(name, def)| (name.clone(), Resolved::new(&group.name, def))))
			.collect();
		Self { params }
	}

	pub(crate) fn resolved_mut(&mut self, name: &str) -> Option<&mut Resolved> {
		self.params.get_mut(name)
	}

	pub fn get(&self, name: &str) -> Result<&Resolved, LookupError> {
		self.params.get(&name.to_ascii_uppercase()).ok_or_else(|| LookupError::Unknown(name.to_string()))
	}

	pub fn iter(&self) -> impl Iterator<Item = &Resolved> {
		self.params.values()
	}

	pub fn was_set(&self, name: &str) -> Result<bool, LookupError> {
		self.get(name).map(Resolved::was_set)
	}

	pub fn filled(&self, name: &str) -> Result<usize, LookupError> {
		self.get(name).map(Resolved::filled)
	}

	pub fn int(&self, name: &str) -> Result<i64, LookupError> {
		self.int_at(name, 0)
	}

	pub fn int_at(&self, name: &str, index: usize) -> Result<i64, LookupError> {
		self.value_at(name, index, "integer", Value::as_int)
	}

	pub fn ints(&self, name: &str) -> Result<Vec<i64>, LookupError> {
		self.all(name, "integer", Value::as_int)
	}

	pub fn real(&self, name: &str) -> Result<f64, LookupError> {
		self.real_at(name, 0)
	}

	pub fn real_at(&self, name: &str, index: usize) -> Result<f64, LookupError> {
		self.value_at(name, index, "real", Value::as_real)
	}

	pub fn reals(&self, name: &str) -> Result<Vec<f64>, LookupError> {
		self.all(name, "real", Value::as_real)
	}

	pub fn string(&self, name: &str) -> Result<&str, LookupError> {
		self.value_at(name, 0, "string", Value::as_str)
	}

	/// All slots of a string parameter, including unset (empty) ones.
	pub fn strings(&self, name: &str) -> Result<Vec<&str>, LookupError> {
		self.all(name, "string", Value::as_str)
	}

	fn value_at<'a, T>(&'a self, name: &str, index: usize, expected: &'static str, extract: fn(&'a Value) -> Option<T>) -> Result<T, LookupError> {
		let resolved = self.get(name)?;
		let value = resolved.values.get(index).ok_or_else(|| LookupError::OutOfBounds {
			name: resolved.def.name.to_string(),
			index,
			len: resolved.values.len(),
		})?;
		extract(value).ok_or_else(|| LookupError::TypeMismatch {
			name: resolved.def.name.to_string(),
			expected,
			found: value.type_name(),
		})
	}

	fn all<'a, T>(&'a self, name: &str, expected: &'static str, extract: fn(&'a Value) -> Option<T>) -> Result<Vec<T>, LookupError> {
		let resolved = self.get(name)?;
		resolved
			.values
			.iter()
			.map(|value| {
				extract(value).ok_or_else(|| LookupError::TypeMismatch {
					name: resolved.def.name.to_string(),
					expected,
					found: value.type_name(),
				})
			})
			.collect()
	}

	/// Reports every resolved parameter once, for the run's audit trail.
	pub fn log_resolved(&self) {
		for resolved in self.params.values() {
			let source = if resolved.was_set() { "namelist" } else { "default" };
			tracing::info!(
				group = %resolved.group,
				name = resolved.def.name,
				value = %format_values(&resolved.values),
				source,
				"resolved parameter"
			);
		}
	}
}

/// Formats a parameter's slots the way they would be written in a namelist.
pub fn format_values(values: &[Value]) -> String {
	values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
