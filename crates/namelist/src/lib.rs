//! Namelist configuration for Cirrus.
//!
//! Configuration text is organized in `$GROUP ... $END` sections of
//! `NAME = value, ...` assignments. A [`Catalog`] declares the recognized
//! parameters of every group together with their type and valid range;
//! [`parse`] resolves a text against it into an immutable [`Namelist`].
//!
//! ```
//! use cirrus_namelist::{Catalog, GroupDecl, ParamDef, parse};
//!
//! let catalog = Catalog::build([GroupDecl::new("MODEL_OPTIONS").param(ParamDef::int("IUVWTEND", 0..=1))]).unwrap();
//! let namelist = parse(&catalog, "$MODEL_OPTIONS iuvwtend = 1 $END").unwrap();
//! assert_eq!(namelist.int("IUVWTEND").unwrap(), 1);
//! ```

pub mod catalog;
pub mod error;
pub mod lexer;
pub mod param;
pub mod parser;
pub mod setter;
pub mod snapshot;

pub use catalog::{Catalog, Group, GroupDecl, ParamLoc};
pub use error::{LookupError, NamelistError, SchemaError, UnknownName};
pub use param::{MAX_NAME_LEN, ParamDef, ParamKind, Value};
pub use parser::parse;
pub use snapshot::{Namelist, Resolved, format_values};
