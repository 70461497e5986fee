//! # Lexer
//!
//! Splits namelist text into assignment statements.
//!
//! ## Supported Syntax
//!
//! ```text
//! text       = (ignored | section)*
//! section    = "$" group statement* "$END"
//! statement  = name "=" value-list
//! value-list = item ((","? ws*) item)*
//! item       = (count "*")? value
//! value      = quoted | bare
//! quoted     = "'" chars "'" | '"' chars '"'
//! ```
//!
//! `!` starts a comment that runs to end of line. Anything outside a section is
//! ignored, including a `$` that is not followed by a name; `$NAME` always opens
//! a section. A value list ends at `$`, at end of input, or where the next
//! `name =` begins, so values may continue over several lines.

use crate::error::NamelistError;

/// One value token. `repeat` is the `n` of an `n*value` item, otherwise one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	pub text: String,
	pub quoted: bool,
	pub repeat: usize,
	pub line: usize,
}

impl Token {
	pub fn bare(text: impl Into<String>) -> Self {
		Self { text: text.into(), quoted: false, repeat: 1, line: 0 }
	}

	pub fn quoted(text: impl Into<String>) -> Self {
		Self { text: text.into(), quoted: true, repeat: 1, line: 0 }
	}
}

/// A `NAME = value, ...` statement inside a group section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
	/// Group name as written in the `$GROUP` header, uppercased.
	pub group: String,
	/// Line of the `$GROUP` header.
	pub group_line: usize,
	/// Parameter name, uppercased.
	pub name: String,
	pub values: Vec<Token>,
	pub line: usize,
}

/// Scanner state over the remaining input.
struct Lexer<'a> {
	input: &'a str,
	line: usize,
}

impl<'a> Lexer<'a> {
	fn new(input: &'a str) -> Self {
		Self { input, line: 1 }
	}

	fn peek(&self) -> Option<char> {
		self.input.chars().next()
	}

	fn next(&mut self) -> Option<char> {
		let ch = self.peek()?;
		self.input = &self.input[ch.len_utf8()..];
		if ch == '\n' {
			self.line += 1;
		}
		Some(ch)
	}

	fn take_while<F>(&mut self, predicate: F) -> &'a str
	where
		F: Fn(char) -> bool,
	{
		let end = self.input.find(|ch: char| !predicate(ch)).unwrap_or(self.input.len());
		let (taken, rest) = self.input.split_at(end);
		self.line += taken.matches('\n').count();
		self.input = rest;
		taken
	}

	/// Skips whitespace and `!` comments.
	fn skip_blank(&mut self) {
		loop {
			self.take_while(char::is_whitespace);
			if self.peek() == Some('!') {
				self.take_while(|ch| ch != '\n');
			} else {
				break;
			}
		}
	}

	/// Runs `f` and rewinds if it returns `None`.
	fn try_scan<T, F>(&mut self, f: F) -> Option<T>
	where
		F: FnOnce(&mut Lexer<'a>) -> Option<T>,
	{
		let snapshot = (self.input, self.line);
		let result = f(self);
		if result.is_none() {
			(self.input, self.line) = snapshot;
		}
		result
	}

	fn identifier(&mut self) -> Option<&'a str> {
		if !self.peek().is_some_and(|ch| ch.is_ascii_alphabetic()) {
			return None;
		}
		Some(self.take_while(|ch| ch.is_ascii_alphanumeric() || ch == '_'))
	}

	/// Consumes `name =` if it starts here.
	fn assignment_head(&mut self) -> Option<&'a str> {
		self.try_scan(|lx| {
			let name = lx.identifier()?;
			lx.skip_blank();
			(lx.next()? == '=').then_some(name)
		})
	}

	/// Reports whether `name =` starts here without consuming it.
	fn at_assignment(&mut self) -> bool {
		let snapshot = (self.input, self.line);
		let found = self.assignment_head().is_some();
		(self.input, self.line) = snapshot;
		found
	}

	fn error(&self, message: impl Into<String>) -> NamelistError {
		NamelistError::Syntax { message: message.into(), line: self.line }
	}
}

/// Scans `text` into statements in source order.
pub fn scan(text: &str) -> Result<Vec<Statement>, NamelistError> {
	let mut lx = Lexer::new(text);
	let mut statements = Vec::new();

	loop {
		lx.take_while(|ch| ch != '$' && ch != '!');
		match lx.next() {
			None => return Ok(statements),
			Some('!') => {
				lx.take_while(|ch| ch != '\n');
				continue;
			}
			Some(_) => {}
		}
		let group_line = lx.line;
		let Some(group) = lx.identifier().map(str::to_ascii_uppercase) else {
			continue;
		};
		if group == "END" {
			return Err(lx.error("$END without an open group"));
		}
		scan_section(&mut lx, &group, group_line, &mut statements)?;
	}
}

fn scan_section(lx: &mut Lexer<'_>, group: &str, group_line: usize, out: &mut Vec<Statement>) -> Result<(), NamelistError> {
	loop {
		lx.skip_blank();
		match lx.peek() {
			None => {
				return Err(NamelistError::UnterminatedGroup { group: group.to_string(), line: group_line });
			}
			Some('$') => {
				lx.next();
				let line = lx.line;
				return match lx.identifier().map(str::to_ascii_uppercase) {
					Some(end) if end == "END" => Ok(()),
					_ => Err(NamelistError::UnterminatedGroup { group: group.to_string(), line }),
				};
			}
			Some(_) => {}
		}

		let line = lx.line;
		let Some(name) = lx.assignment_head() else {
			let found = lx.take_while(|ch| !ch.is_whitespace());
			return Err(lx.error(format!("expected 'NAME =' in ${group}, found '{found}'")));
		};
		let values = scan_values(lx)?;
		if values.is_empty() {
			return Err(NamelistError::Syntax { message: format!("no value given for {}", name.to_ascii_uppercase()), line });
		}
		out.push(Statement {
			group: group.to_string(),
			group_line,
			name: name.to_ascii_uppercase(),
			values,
			line,
		});
	}
}

fn scan_values(lx: &mut Lexer<'_>) -> Result<Vec<Token>, NamelistError> {
	let mut values = Vec::new();
	loop {
		lx.skip_blank();
		if lx.peek() == Some(',') {
			lx.next();
			continue;
		}
		match lx.peek() {
			None | Some('$') => return Ok(values),
			Some(_) => {}
		}
		if lx.at_assignment() {
			return Ok(values);
		}
		scan_item(lx, &mut values)?;
	}
}

fn scan_item(lx: &mut Lexer<'_>, out: &mut Vec<Token>) -> Result<(), NamelistError> {
	let repeat = lx.try_scan(|lx| {
		let digits = lx.take_while(|ch| ch.is_ascii_digit());
		if digits.is_empty() || lx.next()? != '*' {
			return None;
		}
		digits.parse::<usize>().ok()
	});

	let line = lx.line;
	let repeat = match repeat {
		Some(0) => return Err(NamelistError::Syntax { message: "repeat count must be positive".to_string(), line }),
		Some(count) => count,
		None => 1,
	};
	let token = match lx.peek() {
		Some(quote @ ('\'' | '"')) => {
			lx.next();
			Token { text: quoted_body(lx, quote)?, quoted: true, repeat, line }
		}
		_ => {
			let text = lx.take_while(|ch| !ch.is_whitespace() && !matches!(ch, ',' | '$' | '!' | '='));
			if text.is_empty() {
				return Err(lx.error(format!("unexpected '{}' in value list", lx.peek().unwrap_or(' '))));
			}
			Token { text: text.to_string(), quoted: false, repeat, line }
		}
	};
	out.push(token);
	Ok(())
}

/// Reads up to the closing quote. A doubled quote stands for one literal quote.
fn quoted_body(lx: &mut Lexer<'_>, quote: char) -> Result<String, NamelistError> {
	let start = lx.line;
	let mut body = String::new();
	loop {
		match lx.next() {
			Some(ch) if ch == quote => {
				if lx.peek() == Some(quote) {
					lx.next();
					body.push(quote);
				} else {
					return Ok(body);
				}
			}
			Some(ch) => body.push(ch),
			None => {
				return Err(NamelistError::Syntax { message: "unterminated string".to_string(), line: start });
			}
		}
	}
}

#[cfg(test)]
mod tests;
