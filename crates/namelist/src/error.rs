//! Namelist error types.
//!
//! [`SchemaError`] reports defects in the compiled-in group declarations and is
//! raised before any configuration text is read. [`NamelistError`] reports bad
//! user input found while parsing. Both are fatal to a run.

use std::fmt;

/// Defect in a namelist group declaration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
	/// A group lists the same parameter name twice.
	#[error("group ${group}: parameter {name} is declared more than once")]
	DuplicateName { group: String, name: String },

	/// Two groups declare the same parameter name.
	#[error("parameter {name} is declared in both ${first} and ${second}")]
	NameInTwoGroups { name: String, first: String, second: String },

	/// The same group name is declared twice.
	#[error("group ${0} is declared more than once")]
	DuplicateGroup(String),

	/// A group's declared element count differs from the names actually listed.
	#[error("group ${group}: declared {declared} parameters but lists {actual}")]
	CountMismatch { group: String, declared: usize, actual: usize },

	/// A parameter name exceeds the namelist name length limit.
	#[error("group ${group}: parameter name {name} is longer than {max} characters")]
	NameTooLong { group: String, name: String, max: usize },

	/// A parameter name contains characters a namelist statement cannot spell.
	#[error("group ${group}: parameter name '{name}' is not a valid identifier")]
	InvalidName { group: String, name: String },

	/// A numeric parameter has `min > max`.
	#[error("parameter {name}: empty valid range [{min}, {max}]")]
	EmptyRange { name: String, min: String, max: String },

	/// An array parameter was declared with zero slots.
	#[error("parameter {name}: array capacity must be at least one")]
	ZeroCapacity { name: String },

	/// The compiled-in default does not have the parameter's type.
	#[error("parameter {name}: default {default} is not of type {expected}")]
	DefaultTypeMismatch { name: String, expected: &'static str, default: String },
}

/// An unrecognized parameter name found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName {
	pub name: String,
	pub group: String,
	pub line: usize,
	pub suggestion: Option<String>,
}

impl fmt::Display for UnknownName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} in ${} (line {})", self.name, self.group, self.line)?;
		if let Some(suggestion) = &self.suggestion {
			write!(f, " (did you mean '{suggestion}'?)")?;
		}
		Ok(())
	}
}

/// User input error found while parsing namelist text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NamelistError {
	/// A value token could not be converted to the parameter's type.
	#[error("line {line}: malformed value '{value}' for {name}: expected {expected}")]
	Malformed { name: String, value: String, expected: &'static str, line: usize },

	/// A numeric value lies outside the declared inclusive range.
	#[error("line {line}: value {value} for {name} is outside the valid range [{min}, {max}]")]
	OutOfRange { name: String, value: String, min: String, max: String, line: usize },

	/// A string value exceeds the declared length bound.
	#[error("line {line}: value '{value}' for {name} is longer than {max_len} characters")]
	StringTooLong { name: String, value: String, max_len: usize, line: usize },

	/// More values were supplied than the parameter has slots.
	#[error("line {line}: too many values for {name} (capacity {capacity})")]
	TooManyValues { name: String, capacity: usize, line: usize },

	/// One or more parameter names are not in any group.
	#[error("unrecognized namelist {}: {}", if names.len() == 1 { "name" } else { "names" }, join(names))]
	Unrecognized { names: Vec<UnknownName> },

	/// A `$GROUP` header names a group that is not declared.
	#[error("line {line}: unknown namelist group ${group}")]
	UnknownGroup { group: String, line: usize },

	/// A group section is not closed by `$END`.
	#[error("line {line}: group ${group} is not terminated by $END")]
	UnterminatedGroup { group: String, line: usize },

	/// The text does not follow namelist statement syntax.
	#[error("line {line}: {message}")]
	Syntax { message: String, line: usize },
}

fn join(names: &[UnknownName]) -> String {
	names.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Error reading a value back out of a resolved [`crate::Namelist`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
	#[error("no parameter named {0}")]
	Unknown(String),

	#[error("parameter {name} is {found}, not {expected}")]
	TypeMismatch { name: String, expected: &'static str, found: &'static str },

	#[error("index {index} is out of bounds for {name} (length {len})")]
	OutOfBounds { name: String, index: usize, len: usize },
}
