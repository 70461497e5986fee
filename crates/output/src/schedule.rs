//! Output cadence.

/// Streams due at one model time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Due {
	pub history: bool,
	pub lite: bool,
	pub mean: bool,
}

impl Due {
	pub fn any(&self) -> bool {
		self.history || self.lite || self.mean
	}
}

/// Output intervals in seconds. An interval of zero disables its stream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OutputSchedule {
	pub history: f64,
	pub lite: f64,
	pub mean: f64,
}

impl OutputSchedule {
	pub fn new(history: f64, lite: f64, mean: f64) -> Self {
		Self { history, lite, mean }
	}

	/// Streams whose interval has a multiple within half a step of `time`.
	///
	/// Time zero is a multiple of every interval, so enabled streams are due at
	/// the start of a run.
	pub fn due(&self, time: f64, dt: f64) -> Due {
		Due {
			history: crosses(self.history, time, dt),
			lite: crosses(self.lite, time, dt),
			mean: crosses(self.mean, time, dt),
		}
	}
}

fn crosses(interval: f64, time: f64, dt: f64) -> bool {
	if interval <= 0.0 || dt <= 0.0 {
		return false;
	}
	let half = 0.5 * dt;
	((time + half) / interval).floor() > ((time - half) / interval).floor()
}

#[cfg(test)]
mod tests;
