//! Serialization seam.
//!
//! A [`FieldSink`] receives one [`FieldView`] per selected field, bracketed by
//! [`FieldSink::begin`] and [`FieldSink::finish`] once per stream and cycle.
//! Formats and files are the sink's business.

use std::fmt;

use cirrus_registry::DimClass;

use crate::error::BoxError;

/// Output stream a field is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
	/// Full analysis output of every history field.
	History,
	/// Reduced output of the user-selected fields.
	Lite,
	/// Time averages of mean fields.
	Mean,
}

impl Stream {
	pub const fn label(self) -> &'static str {
		match self {
			Self::History => "history",
			Self::Lite => "lite",
			Self::Mean => "mean",
		}
	}
}

impl fmt::Display for Stream {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Borrowed view of one field handed to a sink.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
	pub grid: usize,
	pub name: &'a str,
	pub dim: DimClass,
	pub len: usize,
	pub values: &'a [f32],
}

/// Receives fields selected for output.
pub trait FieldSink {
	/// Called once before the first field of `stream` in a cycle.
	fn begin(&mut self, _stream: Stream, _time: f64) -> Result<(), BoxError> {
		Ok(())
	}

	fn write(&mut self, stream: Stream, time: f64, field: FieldView<'_>) -> Result<(), BoxError>;

	/// Called once after the last field of `stream` in a cycle.
	fn finish(&mut self, _stream: Stream, _time: f64) -> Result<(), BoxError> {
		Ok(())
	}
}

/// A field captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	pub stream: Stream,
	pub time: f64,
	pub grid: usize,
	pub name: String,
	pub dim: DimClass,
	pub values: Vec<f32>,
}

/// Sink that keeps a copy of everything written to it.
#[derive(Debug, Default)]
pub struct RecordingSink {
	pub records: Vec<Record>,
	/// `(stream, time)` of every finished stream cycle, in call order.
	pub cycles: Vec<(Stream, f64)>,
}

impl RecordingSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Names written to `stream`, in write order.
	pub fn names(&self, stream: Stream) -> Vec<&str> {
		self.records.iter().filter(|r| r.stream == stream).map(|r| r.name.as_str()).collect()
	}

	/// Most recent record of `name` on `grid` in `stream`.
	pub fn latest(&self, stream: Stream, grid: usize, name: &str) -> Option<&Record> {
		self.records.iter().rev().find(|r| r.stream == stream && r.grid == grid && r.name == name)
	}

	pub fn clear(&mut self) {
		self.records.clear();
		self.cycles.clear();
	}
}

impl FieldSink for RecordingSink {
	fn write(&mut self, stream: Stream, time: f64, field: FieldView<'_>) -> Result<(), BoxError> {
		self.records.push(Record {
			stream,
			time,
			grid: field.grid,
			name: field.name.to_string(),
			dim: field.dim,
			values: field.values.to_vec(),
		});
		Ok(())
	}

	fn finish(&mut self, stream: Stream, time: f64) -> Result<(), BoxError> {
		self.cycles.push((stream, time));
		Ok(())
	}
}

/// Sink that logs summary statistics of each field instead of storing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl FieldSink for TracingSink {
	fn begin(&mut self, stream: Stream, time: f64) -> Result<(), BoxError> {
		tracing::info!(%stream, time, "output cycle started");
		Ok(())
	}

	fn write(&mut self, stream: Stream, time: f64, field: FieldView<'_>) -> Result<(), BoxError> {
		let (min, max, sum) = field
			.values
			.iter()
			.fold((f32::INFINITY, f32::NEG_INFINITY, 0.0f64), |(lo, hi, sum), &v| (lo.min(v), hi.max(v), sum + f64::from(v)));
		let mean = if field.values.is_empty() { 0.0 } else { sum / field.values.len() as f64 };
		tracing::info!(%stream, time, grid = field.grid, name = field.name, dim = %field.dim, len = field.len, min, max, mean, "field");
		Ok(())
	}
}
