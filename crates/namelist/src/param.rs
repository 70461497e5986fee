//! Parameter declarations and resolved values.

use std::fmt;
use std::ops::RangeInclusive;

/// Longest parameter name accepted in a namelist group.
pub const MAX_NAME_LEN: usize = 16;

/// Declared type and valid range of a parameter.
///
/// Numeric bounds are inclusive. String parameters carry a length bound instead
/// of a value range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
	Int { min: i64, max: i64 },
	Real { min: f64, max: f64 },
	Str { max_len: usize },
}

impl ParamKind {
	/// Short type name used in diagnostics.
	pub fn type_name(&self) -> &'static str {
		match self {
			ParamKind::Int { .. } => "integer",
			ParamKind::Real { .. } => "real",
			ParamKind::Str { .. } => "string",
		}
	}

	/// Zero-equivalent value for this type.
	pub fn zero(&self) -> Value {
		match self {
			ParamKind::Int { .. } => Value::Int(0),
			ParamKind::Real { .. } => Value::Real(0.0),
			ParamKind::Str { .. } => Value::Str(String::new()),
		}
	}

	pub(crate) fn accepts(&self, value: &Value) -> bool {
		matches!(
			(self, value),
			(ParamKind::Int { .. }, Value::Int(_)) | (ParamKind::Real { .. }, Value::Real(_)) | (ParamKind::Str { .. }, Value::Str(_))
		)
	}
}

/// A resolved parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Int(i64),
	Real(f64),
	Str(String),
}

impl Value {
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Int(_) => "integer",
			Value::Real(_) => "real",
			Value::Str(_) => "string",
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			Value::Int(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_real(&self) -> Option<f64> {
		match self {
			Value::Real(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(v) => Some(v),
			_ => None,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Int(v) => write!(f, "{v}"),
			Value::Real(v) => write!(f, "{v:?}"),
			Value::Str(v) => write!(f, "'{v}'"),
		}
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int(i64::from(v))
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Real(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Str(v.to_string())
	}
}

/// Declaration of one namelist parameter.
///
/// A parameter is a scalar unless [`ParamDef::array`] gives it a capacity. Every
/// slot starts at the declared default, which is the zero-equivalent of its type
/// unless [`ParamDef::default`] overrides it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDef {
	pub name: &'static str,
	pub kind: ParamKind,
	pub len: usize,
	pub default: Value,
}

impl ParamDef {
	pub fn int(name: &'static str, range: RangeInclusive<i64>) -> Self {
		Self::scalar(name, ParamKind::Int { min: *range.start(), max: *range.end() })
	}

	pub fn real(name: &'static str, range: RangeInclusive<f64>) -> Self {
		Self::scalar(name, ParamKind::Real { min: *range.start(), max: *range.end() })
	}

	pub fn string(name: &'static str, max_len: usize) -> Self {
		Self::scalar(name, ParamKind::Str { max_len })
	}

	fn scalar(name: &'static str, kind: ParamKind) -> Self {
		Self { name, kind, len: 1, default: kind.zero() }
	}

	/// Makes this an array parameter with `len` slots.
	pub fn array(mut self, len: usize) -> Self {
		self.len = len;
		self
	}

	/// Replaces the zero-equivalent default.
	pub fn default(mut self, value: impl Into<Value>) -> Self {
		self.default = value.into();
		self
	}

	pub fn is_array(&self) -> bool {
		self.len > 1
	}
}
