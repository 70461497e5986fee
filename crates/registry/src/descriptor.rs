//! Compact field descriptors.
//!
//! A descriptor names a field, its dimensionality code and its intents:
//!
//! ```text
//! UP      : 3 : hist : lite : mpti
//! UT_ADV  : 3 : hist : mean
//! TOPT    : 2 : hist
//! ```
//!
//! Descriptors are parsed once when a module's field table is set up and are
//! never consulted again at runtime.

use std::str::FromStr;

use crate::dim::DimClass;
use crate::error::{DescriptorError, RegistryError};
use crate::intent::{Intent, IntentFlags};
use crate::registry::validate_name;

/// Name, shape class and intents of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
	pub name: String,
	pub dim: DimClass,
	pub intent: IntentFlags,
}

impl FieldDescriptor {
	pub fn new(name: &str, dim: DimClass, intent: IntentFlags) -> Result<Self, RegistryError> {
		let name = validate_name(name)?;
		Ok(Self { name, dim, intent })
	}

	pub fn parse(descriptor: &str) -> Result<Self, DescriptorError> {
		let mut parts = descriptor.split(':').map(str::trim);
		let (Some(name), Some(code)) = (parts.next(), parts.next()) else {
			return Err(DescriptorError::Shape(descriptor.to_string()));
		};
		let dim = code
			.parse::<u8>()
			.ok()
			.and_then(DimClass::from_code)
			.ok_or_else(|| DescriptorError::UnknownDim { descriptor: descriptor.to_string(), code: code.to_string() })?;

		let mut intent = IntentFlags::empty();
		let mut seen = Vec::new();
		for token in parts {
			let parsed = Intent::from_token(token)
				.ok_or_else(|| DescriptorError::UnknownToken { descriptor: descriptor.to_string(), token: token.to_string() })?;
			if seen.contains(&parsed) {
				return Err(DescriptorError::RepeatedToken { descriptor: descriptor.to_string(), token: token.to_string() });
			}
			seen.push(parsed);
			intent |= parsed.as_set();
		}

		Ok(Self::new(name, dim, intent)?)
	}

	pub fn has(&self, intent: Intent) -> bool {
		self.intent.contains(intent.as_set())
	}
}

impl FromStr for FieldDescriptor {
	type Err = DescriptorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

/// Parses a module's descriptor table, rejecting repeated field names.
///
/// A repeated name in one table is a schema defect, unlike a repeated
/// [`crate::VariableRegistry::register`] call, which replaces.
pub fn parse_table(descriptors: &[&str]) -> Result<Vec<FieldDescriptor>, DescriptorError> {
	let mut table: Vec<FieldDescriptor> = Vec::with_capacity(descriptors.len());
	for raw in descriptors {
		let desc = FieldDescriptor::parse(raw)?;
		if table.iter().any(|existing| existing.name == desc.name) {
			return Err(DescriptorError::DuplicateField(desc.name));
		}
		table.push(desc);
	}
	Ok(table)
}

#[cfg(test)]
mod tests;
