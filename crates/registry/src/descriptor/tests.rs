use pretty_assertions::assert_eq;

use super::*;

#[test]
fn parses_name_code_and_tokens() {
	let desc = FieldDescriptor::parse("UP : 3 : hist : lite : mpti").unwrap();
	assert_eq!(desc.name, "UP");
	assert_eq!(desc.dim, DimClass::Atmos3d);
	assert_eq!(desc.intent, IntentFlags::HIST | IntentFlags::LITE | IntentFlags::SYNC);
}

#[test]
fn tendency_token_implies_sync() {
	let desc: FieldDescriptor = "ut :3:mptt".parse().unwrap();
	assert_eq!(desc.name, "UT");
	assert_eq!(desc.intent, IntentFlags::SYNC | IntentFlags::SYNC_TEND);
	assert!(desc.has(Intent::Sync));
	assert!(desc.has(Intent::SyncTendency));
}

#[test]
fn descriptor_without_tokens_has_no_intent() {
	let desc = FieldDescriptor::parse("SCRATCH : 2").unwrap();
	assert!(desc.intent.is_empty());
	assert_eq!(desc.dim, DimClass::Horizontal2d);
}

#[test]
fn rejects_malformed_descriptors() {
	assert_eq!(FieldDescriptor::parse("UP").unwrap_err(), DescriptorError::Shape("UP".into()));
	assert!(matches!(FieldDescriptor::parse("UP : 9 : hist"), Err(DescriptorError::UnknownDim { code, .. }) if code == "9"));
	assert!(matches!(FieldDescriptor::parse("UP : x"), Err(DescriptorError::UnknownDim { .. })));
	assert!(matches!(FieldDescriptor::parse("UP : 3 : anal"), Err(DescriptorError::UnknownToken { token, .. }) if token == "anal"));
	assert!(matches!(FieldDescriptor::parse("UP : 3 : hist : HIST"), Err(DescriptorError::RepeatedToken { .. })));
	assert_eq!(FieldDescriptor::parse(" : 3").unwrap_err(), DescriptorError::Name(RegistryError::EmptyName));
}

#[test]
fn rejects_names_over_limit() {
	let long = "A".repeat(33);
	assert!(matches!(
		FieldDescriptor::parse(&format!("{long} : 2")),
		Err(DescriptorError::Name(RegistryError::NameTooLong { max: 32, .. }))
	));
	assert!(FieldDescriptor::parse(&format!("{} : 2", "A".repeat(32))).is_ok());
}

#[test]
fn every_dim_code_round_trips() {
	for dim in DimClass::ALL {
		let desc = FieldDescriptor::parse(&format!("F : {}", dim.code())).unwrap();
		assert_eq!(desc.dim, dim);
	}
}

#[test]
fn table_rejects_duplicate_names() {
	let err = parse_table(&["UP : 3 : hist", "VP : 3 : hist", "up : 3 : lite"]).unwrap_err();
	assert_eq!(err, DescriptorError::DuplicateField("UP".into()));
}

#[test]
fn table_keeps_declaration_order() {
	let table = parse_table(&["UP : 3 : hist", "TOPT : 2 : hist", "SOILW : 4 : hist : mean"]).unwrap();
	let names: Vec<_> = table.iter().map(|d| d.name.as_str()).collect();
	assert_eq!(names, vec!["UP", "TOPT", "SOILW"]);
}
