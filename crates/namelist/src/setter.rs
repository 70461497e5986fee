//! Typed setters.
//!
//! Each setter converts one value token to its parameter's type, checks it
//! against the declared bounds, and writes it into a slot of the target. The
//! setters know nothing about groups or statements; the parser attaches the
//! parameter name and line to any [`SetFault`].

use crate::lexer::Token;
use crate::param::{ParamKind, Value};

/// Why a setter rejected a token.
#[derive(Debug, Clone, PartialEq)]
pub enum SetFault {
	Malformed { expected: &'static str },
	OutOfRange { min: String, max: String },
	TooLong { max_len: usize },
	NoSlot { capacity: usize },
}

/// Converts `token` per `kind` and stores it at `target[index]`.
pub fn set(kind: &ParamKind, target: &mut [Value], index: usize, token: &Token) -> Result<(), SetFault> {
	let capacity = target.len();
	let slot = target.get_mut(index).ok_or(SetFault::NoSlot { capacity })?;
	*slot = match *kind {
		ParamKind::Int { min, max } => Value::Int(set_int(token, min, max)?),
		ParamKind::Real { min, max } => Value::Real(set_real(token, min, max)?),
		ParamKind::Str { max_len } => Value::Str(set_string(token, max_len)?),
	};
	Ok(())
}

/// Parses an integer token and checks `min <= value <= max`.
pub fn set_int(token: &Token, min: i64, max: i64) -> Result<i64, SetFault> {
	if token.quoted {
		return Err(SetFault::Malformed { expected: "integer" });
	}
	let text = token.text.strip_prefix('+').unwrap_or(&token.text);
	let value = text.parse::<i64>().map_err(|_| SetFault::Malformed { expected: "integer" })?;
	if value < min || value > max {
		return Err(SetFault::OutOfRange { min: min.to_string(), max: max.to_string() });
	}
	Ok(value)
}

/// Parses a real token and checks `min <= value <= max`.
///
/// Accepts integer spellings and the Fortran `D` exponent (`1.5D3`).
pub fn set_real(token: &Token, min: f64, max: f64) -> Result<f64, SetFault> {
	if token.quoted {
		return Err(SetFault::Malformed { expected: "real" });
	}
	let value = parse_real(&token.text).ok_or(SetFault::Malformed { expected: "real" })?;
	if value < min || value > max {
		return Err(SetFault::OutOfRange { min: format!("{min:?}"), max: format!("{max:?}") });
	}
	Ok(value)
}

/// Copies a string token, enforcing the length bound.
pub fn set_string(token: &Token, max_len: usize) -> Result<String, SetFault> {
	if token.text.chars().count() > max_len {
		return Err(SetFault::TooLong { max_len });
	}
	Ok(token.text.clone())
}

fn parse_real(text: &str) -> Option<f64> {
	let normalized: String = text
		.chars()
		.map(|ch| match ch {
			'd' | 'D' => 'e',
			other => other,
		})
		.collect();
	let normalized = normalized.strip_prefix('+').unwrap_or(&normalized);
	// Rust accepts "inf" and "NaN"; a namelist does not.
	if !normalized.starts_with(|ch: char| ch.is_ascii_digit() || ch == '-' || ch == '.') {
		return None;
	}
	normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
