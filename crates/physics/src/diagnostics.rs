//! Optional momentum-tendency diagnostics.
//!
//! One registry-backed field per instrumented term. All of them exist only
//! while the momentum diagnostics flag is on; each lives in an
//! [`OptionalField`], so the registry entry and the storage appear and
//! disappear together.

use cirrus_registry::{DescriptorError, Field, IntentFlags, OptionalField, RegistryError, VariableRegistry, parse_table};

/// An instrumented tendency term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
	UtAdv,
	VtAdv,
	WtAdv,
	UtPgf,
	VtPgf,
	WtPgf,
	WtBuoy,
}

impl Term {
	pub const ALL: [Term; 7] = [Term::UtAdv, Term::VtAdv, Term::WtAdv, Term::UtPgf, Term::VtPgf, Term::WtPgf, Term::WtBuoy];

	pub const fn name(self) -> &'static str {
		match self {
			Self::UtAdv => "UT_ADV",
			Self::VtAdv => "VT_ADV",
			Self::WtAdv => "WT_ADV",
			Self::UtPgf => "UT_PGF",
			Self::VtPgf => "VT_PGF",
			Self::WtPgf => "WT_PGF",
			Self::WtBuoy => "WT_BUOY",
		}
	}

	const fn slot(self) -> usize {
		self as usize
	}
}

/// Descriptors of the diagnostic fields, in [`Term::ALL`] order.
pub const DIAGNOSTIC_TABLE: [&str; 7] = [
	"UT_ADV : 3 : hist : lite",
	"VT_ADV : 3 : hist : lite",
	"WT_ADV : 3 : hist : lite",
	"UT_PGF : 3 : hist : lite",
	"VT_PGF : 3 : hist : lite",
	"WT_PGF : 3 : hist : lite",
	"WT_BUOY : 3 : hist : lite",
];

/// Instrumentation switches resolved from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TendencyFlags {
	/// Capture per-routine momentum tendency terms.
	pub momentum: bool,
	/// Also carry a time average of each captured term.
	pub time_mean: bool,
}

/// The momentum diagnostic slots of one grid.
#[derive(Debug)]
pub struct MomentumDiagnostics {
	slots: Vec<OptionalField>,
	flags: TendencyFlags,
}

impl MomentumDiagnostics {
	/// Absent slots of `points` values each.
	///
	/// With `flags.time_mean` every slot is declared time-averaged and carries
	/// an accumulator once enabled.
	pub fn new(points: usize, flags: TendencyFlags) -> Result<Self, DescriptorError> {
		let mut table = parse_table(&DIAGNOSTIC_TABLE)?;
		if flags.time_mean {
			for desc in &mut table {
				desc.intent |= IntentFlags::MEAN;
			}
		}
		let slots = table.into_iter().map(|desc| OptionalField::new(desc, points)).collect();
		Ok(Self { slots, flags })
	}

	pub fn flags(&self) -> TendencyFlags {
		self.flags
	}

	pub fn is_enabled(&self) -> bool {
		self.flags.momentum
	}

	/// Allocates and registers, or unregisters and releases, every slot.
	///
	/// If any slot fails to register, slots enabled by this call are released
	/// again and the diagnostics stay as they were.
	pub fn set_enabled(&mut self, enabled: bool, registry: &mut VariableRegistry) -> Result<(), RegistryError> {
		if enabled {
			let present: Vec<bool> = self.slots.iter().map(OptionalField::is_present).collect();
			if let Err(err) = self.slots.iter_mut().try_for_each(|slot| slot.set_enabled(true, registry)) {
				for (slot, was_present) in self.slots.iter_mut().zip(present) {
					if !was_present {
						slot.disable(registry);
					}
				}
				return Err(err);
			}
		} else {
			for slot in &mut self.slots {
				slot.disable(registry);
			}
		}
		if enabled != self.flags.momentum {
			tracing::info!(grid = registry.grid(), enabled, "momentum tendency diagnostics toggled");
		}
		self.flags.momentum = enabled;
		Ok(())
	}

	/// Brings the slots in line with the configured flag.
	pub fn sync(&mut self, registry: &mut VariableRegistry) -> Result<(), RegistryError> {
		self.set_enabled(self.flags.momentum, registry)
	}

	/// The registered field for `term`, or `None` while diagnostics are off.
	pub fn target(&self, term: Term) -> Option<&Field> {
		self.slots.get(term.slot()).and_then(OptionalField::field)
	}

	/// Adds the current value of every time-averaged diagnostic to its accumulator.
	pub fn accumulate_means(&self, dt: f64) {
		for slot in &self.slots {
			if let (Some(field), Some(mean)) = (slot.field(), slot.mean()) {
				mean.accumulate_from(field, dt);
			}
		}
	}

	/// Unregisters and releases every slot.
	pub fn release(&mut self, registry: &mut VariableRegistry) {
		for slot in &mut self.slots {
			slot.disable(registry);
		}
	}
}

#[cfg(test)]
mod tests;
