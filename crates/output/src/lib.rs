//! Output and synchronization driver for Cirrus.
//!
//! The driver never learns about fields except through a grid's
//! [`VariableRegistry`](cirrus_registry::VariableRegistry). Every output cycle it
//! selects entries by intent and hands them to a [`FieldSink`]; every
//! communication cycle it hands synchronized entries to a [`HaloExchange`],
//! primary fields before their tendency variants.
//!
//! Actual file writing and inter-subdomain transport are collaborators behind
//! those two traits. [`RecordingSink`], [`TracingSink`], [`PeriodicHalo`] and
//! [`RecordingExchange`] cover single-unit runs and tests.

pub mod driver;
pub mod error;
pub mod halo;
pub mod schedule;
pub mod sink;

pub use driver::{CycleReport, ExchangeReport, LiteSelection, OutputDriver};
pub use error::{BoxError, OutputError};
pub use halo::{ExchangeEvent, ExchangeField, HaloError, HaloExchange, PeriodicHalo, RecordingExchange, Stencil};
pub use schedule::{Due, OutputSchedule};
pub use sink::{FieldSink, FieldView, Record, RecordingSink, Stream, TracingSink};
