//! Namelist parser.
//!
//! Walks the statements produced by the lexer, resolves each name against the
//! [`Catalog`], and dispatches every value token to the typed setter for its
//! parameter.
//!
//! # Policy
//!
//! - Range, type and capacity violations abort at the offending statement.
//! - Unrecognized names are fatal too, but parsing continues first so a single
//!   run reports all of them. Each is logged as it is found.
//! - A scalar named again is overwritten; the last statement wins.
//! - An array named again continues filling from the next free slot.

use crate::catalog::Catalog;
use crate::error::{NamelistError, UnknownName};
use crate::lexer::{self, Statement, Token};
use crate::param::{ParamKind, Value};
use crate::setter::{self, SetFault};
use crate::snapshot::{Namelist, Resolved};

/// Parses namelist `text` against `catalog`.
///
/// # Errors
///
/// Returns a [`NamelistError`] for any malformed, out-of-range or unrecognized
/// input. No partial result is returned.
pub fn parse(catalog: &Catalog, text: &str) -> Result<Namelist, NamelistError> {
	let statements = lexer::scan(text)?;
	let mut namelist = Namelist::defaults(catalog);
	let mut unknown = Vec::new();

	for stmt in &statements {
		if catalog.group(&stmt.group).is_none() {
			return Err(NamelistError::UnknownGroup { group: stmt.group.clone(), line: stmt.group_line });
		}

		let Some(resolved) = catalog.lookup(&stmt.name).and_then(|_| namelist.resolved_mut(&stmt.name)) else {
			let suggestion = catalog.suggest(&stmt.name).map(str::to_string);
			tracing::error!(
				name = %stmt.name,
				group = %stmt.group,
				line = stmt.line,
				suggestion = suggestion.as_deref().unwrap_or(""),
				"unrecognized namelist name"
			);
			unknown.push(UnknownName { name: stmt.name.clone(), group: stmt.group.clone(), line: stmt.line, suggestion });
			continue;
		};

		assign(resolved, stmt)?;
	}

	if !unknown.is_empty() {
		return Err(NamelistError::Unrecognized { names: unknown });
	}
	Ok(namelist)
}

fn assign(resolved: &mut Resolved, stmt: &Statement) -> Result<(), NamelistError> {
	let def = &resolved.def;
	if !def.is_array() {
		let supplied = stmt.values.iter().fold(0usize, |sum, token| sum.saturating_add(token.repeat));
		if supplied > 1 {
			return Err(NamelistError::TooManyValues { name: stmt.name.clone(), capacity: 1, line: stmt.line });
		}
		resolved.cursor = 0;
	}

	for token in &stmt.values {
		if resolved.cursor.saturating_add(token.repeat) > def.len {
			return Err(NamelistError::TooManyValues { name: stmt.name.clone(), capacity: def.len, line: token.line });
		}
		for _ in 0..token.repeat {
			fill(resolved.cursor, &def.kind, &mut resolved.values, stmt, token)?;
			resolved.cursor += 1;
			resolved.assigned += 1;
		}
	}

	if !def.is_array() {
		resolved.cursor = 0;
	}
	Ok(())
}

fn fill(index: usize, kind: &ParamKind, values: &mut [Value], stmt: &Statement, token: &Token) -> Result<(), NamelistError> {
	setter::set(kind, values, index, token).map_err(|fault| match fault {
		SetFault::Malformed { expected } => NamelistError::Malformed {
			name: stmt.name.clone(),
			value: token.text.clone(),
			expected,
			line: token.line,
		},
		SetFault::OutOfRange { min, max } => NamelistError::OutOfRange {
			name: stmt.name.clone(),
			value: token.text.clone(),
			min,
			max,
			line: token.line,
		},
		SetFault::TooLong { max_len } => NamelistError::StringTooLong {
			name: stmt.name.clone(),
			value: token.text.clone(),
			max_len,
			line: token.line,
		},
		SetFault::NoSlot { capacity } => NamelistError::TooManyValues { name: stmt.name.clone(), capacity, line: token.line },
	})
}

#[cfg(test)]
mod tests;
