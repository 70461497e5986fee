use super::*;

#[test]
fn catalog_builds() {
	let catalog = catalog().unwrap();
	let names: Vec<_> = catalog.groups().iter().map(|g| g.name.as_str()).collect();
	assert_eq!(names, vec![GRIDS, FILE_INFO, OPTIONS, SOUND]);
}

#[test]
fn declared_counts_match() {
	let catalog = catalog().unwrap();
	for (group, count) in [(GRIDS, 10), (FILE_INFO, 6), (OPTIONS, 6), (SOUND, 4)] {
		assert_eq!(catalog.group(group).unwrap().len(), count, "{group}");
	}
}

#[test]
fn instrumentation_flags_are_binary() {
	let catalog = catalog().unwrap();
	for name in ["IUVWTEND", "IMEANTEND"] {
		let (loc, def) = catalog.lookup(name).unwrap();
		assert_eq!(catalog.groups()[loc.group].name, OPTIONS);
		assert_eq!(def.kind, cirrus_namelist::ParamKind::Int { min: 0, max: 1 });
	}
}
