//! Physics glue for Cirrus.
//!
//! Owns one grid's prognostic fields and tendency arrays, registers them with
//! the grid's [`VariableRegistry`](cirrus_registry::VariableRegistry), and runs
//! the instrumented routines that fill the tendencies each step.
//!
//! Every routine adds its terms through a [`Contributions`] handle. When the
//! routine's diagnostic is enabled the handle mirrors each term into a
//! [`DiagnosticBuffer`] that overwrites the registered diagnostic field when the
//! routine returns.

pub mod advection;
pub mod buoyancy;
pub mod diag;
pub mod diagnostics;
pub mod error;
pub mod pgf;
pub mod state;
mod stencil;

pub use diag::{Contributions, DiagnosticBuffer};
pub use diagnostics::{DIAGNOSTIC_TABLE, MomentumDiagnostics, TendencyFlags, Term};
pub use error::StateError;
pub use state::{GRAVITY, Geometry, GridState, Initial, ReferenceState, STATE_TABLE, TENDENCY_TABLE, Tendencies};
