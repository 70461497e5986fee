use cirrus_registry::{DimClass, FieldDescriptor, IntentFlags, OptionalField, RegistryError, VariableRegistry};
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn table_follows_term_order() {
	for (term, desc) in Term::ALL.into_iter().zip(DIAGNOSTIC_TABLE) {
		assert_eq!(FieldDescriptor::parse(desc).unwrap().name, term.name());
	}
}

#[test]
fn disabled_diagnostics_have_no_targets() {
	let mut registry = VariableRegistry::new(0);
	let mut diags = MomentumDiagnostics::new(8, TendencyFlags::default()).unwrap();
	diags.sync(&mut registry).unwrap();
	assert!(Term::ALL.into_iter().all(|term| diags.target(term).is_none()));
	assert!(registry.is_empty());
}

#[test]
fn enabling_registers_every_term_for_history() {
	let mut registry = VariableRegistry::new(0);
	let mut diags = MomentumDiagnostics::new(8, TendencyFlags::default()).unwrap();
	diags.set_enabled(true, &mut registry).unwrap();

	let names: Vec<_> = registry.entries_with(IntentFlags::HIST).map(|e| e.name.as_str()).collect();
	assert_eq!(names, Term::ALL.map(Term::name).to_vec());
	assert!(Term::ALL.into_iter().all(|term| diags.target(term).is_some_and(|f| f.len() == 8)));

	diags.set_enabled(false, &mut registry).unwrap();
	assert!(registry.is_empty());
	assert!(!diags.is_enabled());
}

#[test]
fn time_mean_adds_accumulators() {
	let mut registry = VariableRegistry::new(0);
	let flags = TendencyFlags { momentum: true, time_mean: true };
	let mut diags = MomentumDiagnostics::new(2, flags).unwrap();
	diags.sync(&mut registry).unwrap();
	assert_eq!(registry.entries_with(IntentFlags::MEAN).count(), Term::ALL.len());

	diags.target(Term::WtBuoy).unwrap().fill(3.0);
	diags.accumulate_means(10.0);
	diags.accumulate_means(10.0);
	let mean = registry.get("WT_BUOY").unwrap().mean().unwrap();
	assert_eq!(mean.lock().flush(), Some(vec![3.0, 3.0]));
}

#[test]
fn failed_enable_releases_slots_enabled_so_far() {
	let mut registry = VariableRegistry::new(0);
	let unnamed = FieldDescriptor { name: String::new(), dim: DimClass::Atmos3d, intent: IntentFlags::HIST };
	let slots = vec![
		OptionalField::new(FieldDescriptor::parse("UT_ADV : 3 : hist").unwrap(), 8),
		OptionalField::new(FieldDescriptor::parse("VT_ADV : 3 : hist").unwrap(), 8),
		OptionalField::new(unnamed, 8),
	];
	let mut diags = MomentumDiagnostics { slots, flags: TendencyFlags::default() };

	assert_eq!(diags.set_enabled(true, &mut registry), Err(RegistryError::EmptyName));
	assert!(!diags.is_enabled());
	assert!(registry.is_empty());
	assert!(diags.slots.iter().all(|slot| !slot.is_present()));
}
