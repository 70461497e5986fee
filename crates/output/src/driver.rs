//! Registry-driven output and exchange cycles.
//!
//! # Role
//!
//! For each grid the driver selects entries by intent:
//!
//! - history: every entry flagged [`IntentFlags::HIST`];
//! - lite: entries flagged [`IntentFlags::LITE`] whose name is in the user's
//!   [`LiteSelection`];
//! - mean: entries flagged [`IntentFlags::MEAN`], flushed from their
//!   accumulators;
//! - exchange: synchronized entries, primary class before tendency class.
//!
//! # Invariants
//!
//! - Entries are visited in registration order, grid by grid.
//! - A mean flush divides by the time elapsed since the previous flush, emits
//!   the quotient, then zeroes the accumulator and its clock.
//! - An entry whose storage has been released is a fatal
//!   [`RegistryError::Dangling`]; the driver never skips it silently.

use cirrus_registry::{ExchangeClass, IntentFlags, RegistryEntry, RegistryError, VariableRegistry};
use indexmap::IndexSet;

use crate::error::OutputError;
use crate::halo::{ExchangeField, HaloExchange};
use crate::schedule::OutputSchedule;
use crate::sink::{FieldSink, FieldView, Stream};

/// User-selected names for the lite stream.
///
/// Names are matched case-insensitively and kept in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteSelection {
	names: IndexSet<String>,
}

impl LiteSelection {
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let names = names
			.into_iter()
			.map(|name| name.as_ref().trim().to_ascii_uppercase())
			.filter(|name| !name.is_empty())
			.collect();
		Self { names }
	}

	pub fn contains(&self, name: &str) -> bool {
		self.names.contains(&name.trim().to_ascii_uppercase())
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.names.iter().map(String::as_str)
	}

	/// Selected names that no registry offers as a lite field.
	pub fn unmatched<'a>(&'a self, registries: &[VariableRegistry]) -> Vec<&'a str> {
		self.iter()
			.filter(|name| !registries.iter().any(|reg| reg.get(name).is_some_and(|entry| entry.intent.contains(IntentFlags::LITE))))
			.collect()
	}
}

/// Number of fields written per stream in one output cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
	pub history: usize,
	pub lite: usize,
	pub mean: usize,
}

impl CycleReport {
	pub fn total(&self) -> usize {
		self.history + self.lite + self.mean
	}
}

/// Number of fields exchanged per class in one communication cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExchangeReport {
	pub primary: usize,
	pub tendency: usize,
}

/// Walks grid registries and feeds selected fields to collaborators.
#[derive(Debug, Clone, Default)]
pub struct OutputDriver {
	lite: LiteSelection,
	schedule: OutputSchedule,
}

impl OutputDriver {
	pub fn new(lite: LiteSelection, schedule: OutputSchedule) -> Self {
		Self { lite, schedule }
	}

	pub fn lite(&self) -> &LiteSelection {
		&self.lite
	}

	pub fn schedule(&self) -> &OutputSchedule {
		&self.schedule
	}

	/// Writes every stream the schedule marks due at `time`.
	pub fn output_cycle(&self, registries: &[VariableRegistry], time: f64, dt: f64, sink: &mut dyn FieldSink) -> Result<CycleReport, OutputError> {
		let due = self.schedule.due(time, dt);
		let mut report = CycleReport::default();
		if due.history {
			report.history = self.write_history(registries, time, sink)?;
		}
		if due.lite {
			report.lite = self.write_lite(registries, time, sink)?;
		}
		if due.mean {
			report.mean = self.flush_means(registries, time, sink)?;
		}
		if report.total() > 0 {
			tracing::info!(time, history = report.history, lite = report.lite, mean = report.mean, "output cycle");
		}
		Ok(report)
	}

	/// Writes every history field of every grid.
	pub fn write_history(&self, registries: &[VariableRegistry], time: f64, sink: &mut dyn FieldSink) -> Result<usize, OutputError> {
		write_stream(Stream::History, registries, time, sink, |reg| reg.entries_with(IntentFlags::HIST).collect())
	}

	/// Writes the selected lite fields of every grid.
	///
	/// An empty selection writes nothing and does not open the stream.
	pub fn write_lite(&self, registries: &[VariableRegistry], time: f64, sink: &mut dyn FieldSink) -> Result<usize, OutputError> {
		if self.lite.is_empty() {
			return Ok(0);
		}
		write_stream(Stream::Lite, registries, time, sink, |reg| {
			reg.entries_with(IntentFlags::LITE).filter(|entry| self.lite.contains(&entry.name)).collect()
		})
	}

	/// Emits the time average of every mean field and resets its accumulator.
	///
	/// Accumulators with no elapsed time since their last flush are skipped.
	pub fn flush_means(&self, registries: &[VariableRegistry], time: f64, sink: &mut dyn FieldSink) -> Result<usize, OutputError> {
		let stream = Stream::Mean;
		sink.begin(stream, time).map_err(|source| OutputError::Stream { stream, time, source })?;
		let mut written = 0;
		for reg in registries {
			for entry in reg.entries_with(IntentFlags::MEAN) {
				let mean = entry.mean().ok_or_else(|| dangling(reg, entry))?;
				let Some(values) = mean.lock().flush() else {
					tracing::debug!(grid = reg.grid(), name = %entry.name, "no elapsed time since last flush; mean skipped");
					continue;
				};
				let view = FieldView { grid: reg.grid(), name: &entry.name, dim: entry.dim, len: entry.len, values: &values };
				sink.write(stream, time, view).map_err(|source| write_error(stream, reg, entry, source))?;
				written += 1;
			}
		}
		sink.finish(stream, time).map_err(|source| OutputError::Stream { stream, time, source })?;
		Ok(written)
	}

	/// Exchanges every synchronized field of every grid.
	///
	/// On each grid all primary fields are exchanged and awaited before any
	/// tendency variant is posted.
	pub fn exchange(&self, registries: &[VariableRegistry], halo: &mut dyn HaloExchange) -> Result<ExchangeReport, OutputError> {
		let mut report = ExchangeReport::default();
		for reg in registries {
			for class in [ExchangeClass::Primary, ExchangeClass::Tendency] {
				let mut posted = 0;
				for entry in reg.entries_matching(move |intent| intent.exchange_class() == Some(class)) {
					let field = entry.storage().ok_or_else(|| dangling(reg, entry))?;
					let post = ExchangeField { grid: reg.grid(), name: &entry.name, dim: entry.dim, class, stencil: class.into(), field: &field };
					halo.exchange(post).map_err(|source| OutputError::Exchange { grid: reg.grid(), name: entry.name.clone(), source })?;
					posted += 1;
				}
				if posted == 0 {
					continue;
				}
				halo.wait(reg.grid(), class).map_err(|source| OutputError::Wait { grid: reg.grid(), class, source })?;
				match class {
					ExchangeClass::Primary => report.primary += posted,
					ExchangeClass::Tendency => report.tendency += posted,
				}
			}
		}
		tracing::debug!(primary = report.primary, tendency = report.tendency, "halo exchange complete");
		Ok(report)
	}
}

fn write_stream<'r, F>(stream: Stream, registries: &'r [VariableRegistry], time: f64, sink: &mut dyn FieldSink, select: F) -> Result<usize, OutputError>
where
	F: Fn(&'r VariableRegistry) -> Vec<&'r RegistryEntry>,
{
	sink.begin(stream, time).map_err(|source| OutputError::Stream { stream, time, source })?;
	let mut written = 0;
	for reg in registries {
		for entry in select(reg) {
			let field = entry.storage().ok_or_else(|| dangling(reg, entry))?;
			let values = field.read();
			let view = FieldView { grid: reg.grid(), name: &entry.name, dim: entry.dim, len: entry.len, values: &values };
			sink.write(stream, time, view).map_err(|source| write_error(stream, reg, entry, source))?;
			written += 1;
		}
	}
	sink.finish(stream, time).map_err(|source| OutputError::Stream { stream, time, source })?;
	Ok(written)
}

fn dangling(reg: &VariableRegistry, entry: &RegistryEntry) -> RegistryError {
	RegistryError::Dangling { grid: reg.grid(), name: entry.name.clone() }
}

fn write_error(stream: Stream, reg: &VariableRegistry, entry: &RegistryEntry, source: crate::error::BoxError) -> OutputError {
	OutputError::Write { stream, grid: reg.grid(), name: entry.name.clone(), source }
}
