use cirrus_registry::{ExchangeClass, FieldDescriptor, VariableRegistry};
use pretty_assertions::assert_eq;

use super::*;
use crate::Term;

const GEOMETRY: Geometry = Geometry { dx: 100.0, dy: 100.0, dz: 50.0 };

fn state(flags: TendencyFlags) -> GridState {
	GridState::new(0, GridDims::new(6, 6, 5), GEOMETRY, flags).unwrap()
}

#[test]
fn tables_follow_field_order() {
	let mut state = state(TendencyFlags::default());
	let mut registry = VariableRegistry::new(0);
	state.register(&mut registry).unwrap();

	for (desc, field) in STATE_TABLE.into_iter().zip(state.state_fields()) {
		let name = FieldDescriptor::parse(desc).unwrap().name;
		assert!(registry.get(&name).unwrap().refers_to(field), "{name}");
	}
	for (desc, field) in TENDENCY_TABLE.into_iter().zip(state.tend.fields()) {
		let name = FieldDescriptor::parse(desc).unwrap().name;
		assert!(registry.get(&name).unwrap().refers_to(field), "{name}");
	}
}

#[test]
fn registration_classifies_exchange() {
	let mut state = state(TendencyFlags::default());
	let mut registry = VariableRegistry::new(0);
	state.register(&mut registry).unwrap();

	let class = |name: &str| registry.get(name).and_then(|e| e.intent.exchange_class());
	assert_eq!(class("UP"), Some(ExchangeClass::Primary));
	assert_eq!(class("UT"), Some(ExchangeClass::Tendency));
	assert_eq!(class("TOPT"), None);
	assert!(registry.get("SOILW").unwrap().mean().is_some());
	assert!(!registry.contains("UT_ADV"));
}

#[test]
fn enabled_diagnostics_register_with_state() {
	let mut state = state(TendencyFlags { momentum: true, time_mean: false });
	let mut registry = VariableRegistry::new(0);
	state.register(&mut registry).unwrap();
	assert_eq!(registry.len(), STATE_TABLE.len() + TENDENCY_TABLE.len() + Term::ALL.len());
	assert!(registry.contains("WT_BUOY"));
}

#[test]
fn release_unregisters_before_dropping() {
	let mut state = state(TendencyFlags { momentum: true, time_mean: true });
	let mut registry = VariableRegistry::new(0);
	state.register(&mut registry).unwrap();
	state.release(&mut registry);
	assert!(registry.is_empty());
	assert_eq!(registry.check_live(), Ok(()));
}

#[test]
fn small_grids_are_rejected() {
	let err = GridState::new(2, GridDims::new(2, 6, 5), GEOMETRY, TendencyFlags::default()).unwrap_err();
	assert_eq!(err, StateError::TooSmall { grid: 2, nx: 2, ny: 6, nz: 5 });
}

#[test]
fn reference_state_must_match_levels() {
	let mut state = state(TendencyFlags::default());
	let err = state.set_reference(ReferenceState::uniform(3, 300.0, 1.0)).unwrap_err();
	assert_eq!(err, StateError::ReferenceLevels { grid: 0, expected: 5, actual: 3 });
	state.set_reference(ReferenceState::uniform(5, 300.0, 1.0)).unwrap();
	assert_eq!(state.reference().map(ReferenceState::levels), Some(5));
}

#[test]
fn rest_state_stays_at_rest() {
	let state = state(TendencyFlags { momentum: true, time_mean: false });
	state.advance(10.0);
	for field in [&state.up, &state.vp, &state.wp, &state.thp] {
		assert!(field.read().iter().all(|&v| v == 0.0));
	}
}

#[test]
fn warm_bubble_rises() {
	let mut state = GridState::new(0, GridDims::new(9, 9, 8), GEOMETRY, TendencyFlags::default()).unwrap();
	state.set_reference(ReferenceState::uniform(8, 300.0, 1.0)).unwrap();
	state.initialize(&Initial { bubble: 2.0, hill_height: 0.0, hill_width: 0.0, soil_moisture: 0.3 });
	let layout = state.layout();
	let centre = layout.index(2, 4, 4, 0);
	assert!(state.thp.read()[centre] > 0.0);

	state.advance(1.0);
	assert!(state.wp.read()[centre] > 0.0);
	assert!(state.soilw.read().iter().all(|&w| w == 0.3));
}

#[test]
fn hill_peaks_at_the_centre() {
	let state = GridState::new(0, GridDims::new(9, 9, 4), GEOMETRY, TendencyFlags::default()).unwrap();
	state.initialize(&Initial { bubble: 0.0, hill_height: 400.0, hill_width: 200.0, soil_moisture: 0.2 });
	let surface = DimClass::Horizontal2d.layout(state.dims());
	let topt = state.topt.read();
	assert_eq!(topt[surface.index(0, 4, 4, 0)], 400.0);
	assert!(topt[surface.index(0, 0, 4, 0)] < 400.0);
	assert!(state.pp.read().iter().all(|&p| p == 0.0));
}

#[test]
fn soil_moisture_is_time_averaged() {
	let mut state = state(TendencyFlags::default());
	let mut registry = VariableRegistry::new(0);
	state.register(&mut registry).unwrap();
	state.soilw.fill(0.25);
	state.accumulate_means(5.0);
	state.soilw.fill(0.75);
	state.accumulate_means(5.0);
	let mean = registry.get("SOILW").unwrap().mean().unwrap().lock().flush().unwrap();
	assert!(mean.iter().all(|&w| w == 0.5));
}
