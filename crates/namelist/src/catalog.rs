//! Namelist group catalog.
//!
//! # Role
//!
//! A [`Catalog`] is the fixed schema of recognized parameters. Each group is
//! declared once as an ordered list of [`ParamDef`]s, so its element count is
//! the length of that list. Declarations that still carry a separately
//! maintained count can state it with [`GroupDecl::declared_count`]; the
//! catalog refuses to build when the two disagree.
//!
//! # Invariants
//!
//! - Validation runs in [`Catalog::build`], before any text is parsed.
//! - A parameter name maps to exactly one group, so lookup needs no group context.

use std::cmp::Ordering;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::error::SchemaError;
use crate::param::{MAX_NAME_LEN, ParamDef, ParamKind};

/// Declaration of one namelist group, as written by the schema author.
#[derive(Debug, Clone)]
pub struct GroupDecl {
	name: &'static str,
	declared: Option<usize>,
	params: Vec<ParamDef>,
}

impl GroupDecl {
	pub fn new(name: &'static str) -> Self {
		Self { name, declared: None, params: Vec::new() }
	}

	/// States the number of parameters the group is expected to hold.
	pub fn declared_count(mut self, count: usize) -> Self {
		self.declared = Some(count);
		self
	}

	pub fn param(mut self, def: ParamDef) -> Self {
		self.params.push(def);
		self
	}

	pub fn params(mut self, defs: impl IntoIterator<Item = ParamDef>) -> Self {
		self.params.extend(defs);
		self
	}
}

/// A validated group: parameter name to declaration, in declaration order.
#[derive(Debug, Clone)]
pub struct Group {
	pub name: String,
	pub params: IndexMap<String, ParamDef>,
}

impl Group {
	pub fn len(&self) -> usize {
		self.params.len()
	}

	pub fn is_empty(&self) -> bool {
		self.params.is_empty()
	}
}

/// Position of a parameter inside a [`Catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamLoc {
	pub group: usize,
	pub index: usize,
}

/// The validated set of namelist groups.
#[derive(Debug, Clone)]
pub struct Catalog {
	groups: Vec<Group>,
	by_name: FxHashMap<String, ParamLoc>,
}

impl Catalog {
	/// Validates the declarations and builds the lookup tables.
	///
	/// # Errors
	///
	/// Returns the first [`SchemaError`] found. These indicate a programming
	/// error in the schema, not bad configuration input.
	pub fn build(decls: impl IntoIterator<Item = GroupDecl>) -> Result<Self, SchemaError> {
		let mut groups: Vec<Group> = Vec::new();
		let mut by_name: FxHashMap<String, ParamLoc> = FxHashMap::default();

		for decl in decls {
			let group_name = decl.name.to_ascii_uppercase();
			if groups.iter().any(|g| g.name == group_name) {
				return Err(SchemaError::DuplicateGroup(group_name));
			}

			let mut params = IndexMap::with_capacity(decl.params.len());
			for def in decl.params {
				validate_def(&group_name, &def)?;
				let key = def.name.to_ascii_uppercase();
				if params.contains_key(&key) {
					return Err(SchemaError::DuplicateName { group: group_name, name: key });
				}
				if let Some(other) = by_name.get(&key) {
					return Err(SchemaError::NameInTwoGroups {
						name: key,
						first: groups[other.group].name.clone(),
						second: group_name,
					});
				}
				by_name.insert(key.clone(), ParamLoc { group: groups.len(), index: params.len() });
				params.insert(key, def);
			}

			if let Some(declared) = decl.declared
				&& declared != params.len()
			{
				return Err(SchemaError::CountMismatch { group: group_name, declared, actual: params.len() });
			}

			groups.push(Group { name: group_name, params });
		}

		Ok(Self { groups, by_name })
	}

	/// Finds a parameter by name, ignoring case.
	pub fn lookup(&self, name: &str) -> Option<(ParamLoc, &ParamDef)> {
		let loc = *self.by_name.get(&name.to_ascii_uppercase())?;
		let (_, def) = self.groups[loc.group].params.get_index(loc.index)?;
		Some((loc, def))
	}

	/// Finds a group by name, ignoring case.
	pub fn group(&self, name: &str) -> Option<&Group> {
		self.groups.iter().find(|g| g.name.eq_ignore_ascii_case(name))
	}

	pub fn groups(&self) -> &[Group] {
		&self.groups
	}

	/// Returns the closest declared parameter name within edit distance 3.
	pub fn suggest(&self, name: &str) -> Option<&str> {
		let name = name.to_ascii_uppercase();
		self.by_name
			.keys()
			.map(|key| (strsim::levenshtein(&name, key), key))
			.filter(|(distance, _)| *distance <= 3)
			.min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)))
			.map(|(_, key)| key.as_str())
	}
}

fn validate_def(group: &str, def: &ParamDef) -> Result<(), SchemaError> {
	let name = def.name;
	if name.len() > MAX_NAME_LEN {
		return Err(SchemaError::NameTooLong { group: group.to_string(), name: name.to_string(), max: MAX_NAME_LEN });
	}
	let valid_ident = name.starts_with(|ch: char| ch.is_ascii_alphabetic()) && name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
	if !valid_ident {
		return Err(SchemaError::InvalidName { group: group.to_string(), name: name.to_string() });
	}
	if def.len == 0 {
		return Err(SchemaError::ZeroCapacity { name: name.to_string() });
	}
	match def.kind {
		ParamKind::Int { min, max } if min > max => {
			return Err(SchemaError::EmptyRange { name: name.to_string(), min: min.to_string(), max: max.to_string() });
		}
		ParamKind::Real { min, max } if matches!(min.partial_cmp(&max), None | Some(Ordering::Greater)) => {
			return Err(SchemaError::EmptyRange { name: name.to_string(), min: format!("{min:?}"), max: format!("{max:?}") });
		}
		_ => {}
	}
	if !def.kind.accepts(&def.default) {
		return Err(SchemaError::DefaultTypeMismatch {
			name: name.to_string(),
			expected: def.kind.type_name(),
			default: def.default.to_string(),
		});
	}
	Ok(())
}
