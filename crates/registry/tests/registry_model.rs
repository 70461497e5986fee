//! Checks the registry against a plain ordered list under random operations.

use cirrus_registry::{DimClass, Field, IntentFlags, VariableRegistry};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
	Register { name: usize, flags: u8 },
	Unregister { name: usize },
}

const NAMES: [&str; 5] = ["UP", "VP", "WP", "PP", "THP"];

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		(0..NAMES.len(), 0u8..32).prop_map(|(name, flags)| Op::Register { name, flags }),
		(0..NAMES.len()).prop_map(|name| Op::Unregister { name }),
	]
}

proptest! {
	#[test]
	fn registry_matches_ordered_model(ops in proptest::collection::vec(op(), 0..40)) {
		let storage: Vec<Field> = NAMES.iter().map(|_| Field::zeros(4)).collect();
		let mut registry = VariableRegistry::new(0);
		let mut model: Vec<(usize, IntentFlags)> = Vec::new();

		for op in ops {
			match op {
				Op::Register { name, flags } => {
					// MEAN needs an accumulator, which this model does not track.
					let flags = IntentFlags::from_bits_truncate(flags) - IntentFlags::MEAN;
					registry.register(NAMES[name], &storage[name], 4, DimClass::Atmos3d, flags).unwrap();
					match model.iter_mut().find(|(n, _)| *n == name) {
						Some(slot) => slot.1 = flags,
						None => model.push((name, flags)),
					}
				}
				Op::Unregister { name } => {
					let removed = registry.unregister(NAMES[name]).is_some();
					let before = model.len();
					model.retain(|(n, _)| *n != name);
					prop_assert_eq!(removed, model.len() != before);
				}
			}
		}

		for flag in [IntentFlags::HIST, IntentFlags::LITE, IntentFlags::SYNC] {
			let expected: Vec<&str> = model.iter().filter(|(_, f)| f.contains(flag)).map(|(n, _)| NAMES[*n]).collect();
			let actual: Vec<&str> = registry.entries_with(flag).map(|e| e.name.as_str()).collect();
			prop_assert_eq!(actual, expected);
		}
		prop_assert_eq!(registry.len(), model.len());
	}
}
