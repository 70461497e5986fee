use super::*;
use crate::FieldDescriptor;

fn slot(descriptor: &str) -> OptionalField {
	OptionalField::new(FieldDescriptor::parse(descriptor).unwrap(), 6)
}

#[test]
fn absent_slot_is_not_registered() {
	let reg = VariableRegistry::new(0);
	let slot = slot("UT_ADV : 3 : hist");
	assert!(!slot.is_present());
	assert!(slot.field().is_none());
	assert!(!reg.contains("UT_ADV"));
}

#[test]
fn enabling_allocates_and_registers_together() {
	let mut reg = VariableRegistry::new(0);
	let mut slot = slot("UT_ADV : 3 : hist");
	let len = slot.enable(&mut reg).unwrap().len();
	assert_eq!(len, 6);

	let entry = reg.get("UT_ADV").expect("enabled slot should be registered");
	assert!(entry.refers_to(slot.field().unwrap()));
	assert_eq!(reg.entries_with(IntentFlags::HIST).count(), 1);
}

#[test]
fn enabling_twice_keeps_the_same_storage() {
	let mut reg = VariableRegistry::new(0);
	let mut slot = slot("UT_ADV : 3 : hist");
	let first = slot.enable(&mut reg).unwrap().downgrade();
	slot.enable(&mut reg).unwrap();
	assert!(first.refers_to(slot.field().unwrap()));
	assert_eq!(reg.len(), 1);
}

#[test]
fn disabling_unregisters_and_releases() {
	let mut reg = VariableRegistry::new(0);
	let mut slot = slot("UT_ADV : 3 : hist");
	let weak = slot.enable(&mut reg).unwrap().downgrade();

	slot.disable(&mut reg);
	assert!(!slot.is_present());
	assert!(!reg.contains("UT_ADV"));
	assert!(!weak.is_live());
	assert_eq!(reg.check_live(), Ok(()));
}

#[test]
fn mean_slot_carries_an_accumulator() {
	let mut reg = VariableRegistry::new(0);
	let mut slot = slot("UT_ADV : 3 : hist : mean");
	slot.set_enabled(true, &mut reg).unwrap();
	assert!(slot.mean().is_some());
	assert!(reg.get("UT_ADV").unwrap().mean().is_some());

	slot.set_enabled(false, &mut reg).unwrap();
	assert!(slot.mean().is_none());
	assert!(reg.is_empty());
}

#[test]
fn failed_registration_leaves_slot_absent() {
	let mut reg = VariableRegistry::new(0);
	let desc = FieldDescriptor { name: String::new(), dim: crate::DimClass::Atmos3d, intent: IntentFlags::HIST };
	let mut slot = OptionalField::new(desc, 2);
	assert_eq!(slot.enable(&mut reg).unwrap_err(), RegistryError::EmptyName);
	assert!(!slot.is_present());
}
