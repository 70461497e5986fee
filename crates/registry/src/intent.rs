/// Output or communication intent of a registered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
	/// Written to every history output.
	History,
	/// Written to the lite stream when the user selects it.
	Lite,
	/// Written as a time average on the mean cadence.
	Mean,
	/// Halo-exchanged every communication cycle.
	Sync,
	/// Halo-exchanged with the tendency stencil, after primary fields.
	SyncTendency,
}

bitflags::bitflags! {
	/// A set of field intents.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct IntentFlags: u8 {
		/// Always serialized to the history stream.
		const HIST = 1 << 0;
		/// Selectable for the lite stream.
		const LITE = 1 << 1;
		/// Time-averaged; carries an accumulator.
		const MEAN = 1 << 2;
		/// Synchronized across subdomains.
		const SYNC = 1 << 3;
		/// Tendency variant of a synchronized field.
		const SYNC_TEND = 1 << 4;
	}
}

impl Intent {
	pub const ALL: [Intent; 5] = [Intent::History, Intent::Lite, Intent::Mean, Intent::Sync, Intent::SyncTendency];

	/// Returns the flags this intent sets.
	///
	/// A tendency variant is still a synchronized field, so it sets both bits.
	pub const fn as_set(self) -> IntentFlags {
		match self {
			Self::History => IntentFlags::HIST,
			Self::Lite => IntentFlags::LITE,
			Self::Mean => IntentFlags::MEAN,
			Self::Sync => IntentFlags::SYNC,
			Self::SyncTendency => IntentFlags::SYNC.union(IntentFlags::SYNC_TEND),
		}
	}

	/// Descriptor token for this intent.
	pub const fn token(self) -> &'static str {
		match self {
			Self::History => "hist",
			Self::Lite => "lite",
			Self::Mean => "mean",
			Self::Sync => "mpti",
			Self::SyncTendency => "mptt",
		}
	}

	pub fn from_token(token: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|intent| intent.token().eq_ignore_ascii_case(token))
	}
}

impl From<Intent> for IntentFlags {
	fn from(intent: Intent) -> Self {
		intent.as_set()
	}
}

impl FromIterator<Intent> for IntentFlags {
	fn from_iter<I: IntoIterator<Item = Intent>>(iter: I) -> Self {
		let mut set = IntentFlags::empty();
		for intent in iter {
			set |= intent.as_set();
		}
		set
	}
}

impl IntentFlags {
	/// Exchange class of a synchronized field, or `None` if it is not synchronized.
	pub fn exchange_class(self) -> Option<ExchangeClass> {
		if self.contains(IntentFlags::SYNC_TEND) {
			Some(ExchangeClass::Tendency)
		} else if self.contains(IntentFlags::SYNC) {
			Some(ExchangeClass::Primary)
		} else {
			None
		}
	}
}

/// Halo-exchange class of a synchronized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExchangeClass {
	/// Prognostic fields; exchanged first over faces only.
	Primary,
	/// Tendency variants; exchanged after primaries over faces and corners.
	Tendency,
}
