use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::{GroupDecl, ParamDef, Value};

fn catalog() -> Catalog {
	Catalog::build([
		GroupDecl::new("MODEL_GRIDS")
			.param(ParamDef::int("NGRIDS", 1..=4).default(1))
			.param(ParamDef::int("NNXP", 4..=2000).array(4))
			.param(ParamDef::real("DELTAX", 10.0..=1.0e6).default(1000.0)),
		GroupDecl::new("MODEL_FILE_INFO")
			.param(ParamDef::string("RUNTYPE", 8).default("INITIAL"))
			.param(ParamDef::string("LITE_VARS", 16).array(3)),
		GroupDecl::new("MODEL_OPTIONS").param(ParamDef::int("IUVWTEND", 0..=1)),
	])
	.unwrap()
}

#[test]
fn unmentioned_parameters_keep_defaults() {
	let nl = parse(&catalog(), "$MODEL_OPTIONS IUVWTEND = 1 $END").unwrap();
	assert_eq!(nl.int("NGRIDS").unwrap(), 1);
	assert_eq!(nl.real("DELTAX").unwrap(), 1000.0);
	assert_eq!(nl.string("RUNTYPE").unwrap(), "INITIAL");
	assert_eq!(nl.ints("NNXP").unwrap(), vec![0, 0, 0, 0]);
	assert!(!nl.was_set("NGRIDS").unwrap());
	assert!(nl.was_set("iuvwtend").unwrap());
}

#[test]
fn empty_text_yields_defaults() {
	let catalog = catalog();
	assert_eq!(parse(&catalog, "").unwrap(), Namelist::defaults(&catalog));
}

#[test]
fn scalar_last_occurrence_wins() {
	let nl = parse(&catalog(), "$MODEL_GRIDS NGRIDS = 2 NGRIDS = 3 $END").unwrap();
	assert_eq!(nl.int("NGRIDS").unwrap(), 3);
}

#[test]
fn scalar_repeated_across_sections_last_wins() {
	let nl = parse(&catalog(), "$MODEL_GRIDS NGRIDS = 2 $END\n$MODEL_GRIDS NGRIDS = 4 $END").unwrap();
	assert_eq!(nl.int("NGRIDS").unwrap(), 4);
}

#[test]
fn array_occurrences_fill_next_slots() {
	let nl = parse(&catalog(), "$MODEL_GRIDS NNXP = 42, 34 NNXP = 26 $END").unwrap();
	assert_eq!(nl.ints("NNXP").unwrap(), vec![42, 34, 26, 0]);
	assert_eq!(nl.get("NNXP").unwrap().assigned, 3);
	assert_eq!(nl.filled("NNXP").unwrap(), 3);
	assert_eq!(nl.filled("NGRIDS").unwrap(), 0);
}

#[test]
fn array_overflow_is_fatal() {
	let err = parse(&catalog(), "$MODEL_GRIDS NNXP = 4*10 NNXP = 12 $END").unwrap_err();
	assert_eq!(err, NamelistError::TooManyValues { name: "NNXP".into(), capacity: 4, line: 1 });
}

#[test]
fn repeat_count_fills_consecutive_slots() {
	let nl = parse(&catalog(), "$MODEL_GRIDS NNXP = 2*40, 50 $END").unwrap();
	assert_eq!(nl.ints("NNXP").unwrap(), vec![40, 40, 50, 0]);
	assert_eq!(nl.filled("NNXP").unwrap(), 3);
}

#[test]
fn repeat_count_beyond_capacity_is_fatal_before_filling() {
	let err = parse(&catalog(), "$MODEL_GRIDS NNXP = 4000000000*10 $END").unwrap_err();
	assert_eq!(err, NamelistError::TooManyValues { name: "NNXP".into(), capacity: 4, line: 1 });
	let err = parse(&catalog(), "$MODEL_GRIDS NNXP = 10, 4*12 $END").unwrap_err();
	assert!(matches!(err, NamelistError::TooManyValues { capacity: 4, .. }));
}

#[test]
fn scalar_with_repeat_count_is_fatal() {
	let err = parse(&catalog(), "$MODEL_GRIDS NGRIDS = 2*1 $END").unwrap_err();
	assert_eq!(err, NamelistError::TooManyValues { name: "NGRIDS".into(), capacity: 1, line: 1 });
}

#[test]
fn scalar_with_several_values_is_fatal() {
	let err = parse(&catalog(), "$MODEL_GRIDS NGRIDS = 1, 2 $END").unwrap_err();
	assert_eq!(err, NamelistError::TooManyValues { name: "NGRIDS".into(), capacity: 1, line: 1 });
}

#[rstest]
#[case("0", 0)]
#[case("1", 1)]
fn flag_bounds_are_accepted(#[case] text: &str, #[case] expected: i64) {
	let nl = parse(&catalog(), &format!("$MODEL_OPTIONS IUVWTEND = {text} $END")).unwrap();
	assert_eq!(nl.int("IUVWTEND").unwrap(), expected);
}

#[test]
fn out_of_range_cites_bounds() {
	let err = parse(&catalog(), "$MODEL_OPTIONS\n  IUVWTEND = 2\n$END").unwrap_err();
	assert_eq!(
		err,
		NamelistError::OutOfRange { name: "IUVWTEND".into(), value: "2".into(), min: "0".into(), max: "1".into(), line: 2 }
	);
	assert_eq!(err.to_string(), "line 2: value 2 for IUVWTEND is outside the valid range [0, 1]");
}

#[test]
fn real_out_of_range_cites_bounds() {
	let err = parse(&catalog(), "$MODEL_GRIDS DELTAX = 5. $END").unwrap_err();
	assert!(matches!(err, NamelistError::OutOfRange { ref min, ref max, .. } if min == "10.0" && max == "1000000.0"));
}

#[test]
fn malformed_token_is_fatal() {
	let err = parse(&catalog(), "$MODEL_GRIDS NGRIDS = two $END").unwrap_err();
	assert_eq!(err, NamelistError::Malformed { name: "NGRIDS".into(), value: "two".into(), expected: "integer", line: 1 });
}

#[test]
fn long_string_is_fatal() {
	let err = parse(&catalog(), "$MODEL_FILE_INFO RUNTYPE = 'HISTORICAL' $END").unwrap_err();
	assert!(matches!(err, NamelistError::StringTooLong { max_len: 8, .. }));
}

#[test]
fn unrecognized_names_are_all_reported() {
	let text = "$MODEL_OPTIONS\n IUVWTNED = 1\n$END\n$MODEL_GRIDS\n NGRIDS = 2\n BOGUS = 3\n$END\n";
	let err = parse(&catalog(), text).unwrap_err();
	let NamelistError::Unrecognized { names } = &err else {
		panic!("expected unrecognized names, got {err:?}");
	};
	assert_eq!(
		names,
		&vec![
			UnknownName { name: "IUVWTNED".into(), group: "MODEL_OPTIONS".into(), line: 2, suggestion: Some("IUVWTEND".into()) },
			UnknownName { name: "BOGUS".into(), group: "MODEL_GRIDS".into(), line: 6, suggestion: None },
		]
	);
	assert!(err.to_string().contains("IUVWTNED in $MODEL_OPTIONS (line 2) (did you mean 'IUVWTEND'?)"));
}

#[test]
fn range_error_takes_precedence_over_later_unknown_names() {
	let err = parse(&catalog(), "$MODEL_OPTIONS BOGUS = 1 IUVWTEND = 5 $END").unwrap_err();
	assert!(matches!(err, NamelistError::OutOfRange { .. }));
}

#[test]
fn unknown_group_is_fatal() {
	let err = parse(&catalog(), "\n$MODEL_ISAN NGRIDS = 1 $END").unwrap_err();
	assert_eq!(err, NamelistError::UnknownGroup { group: "MODEL_ISAN".into(), line: 2 });
}

#[test]
fn names_resolve_regardless_of_section() {
	let nl = parse(&catalog(), "$MODEL_OPTIONS NGRIDS = 2 $END").unwrap();
	assert_eq!(nl.int("NGRIDS").unwrap(), 2);
}

#[test]
fn string_array_keeps_unset_slots_empty() {
	let nl = parse(&catalog(), "$MODEL_FILE_INFO LITE_VARS = 'UP', 'VP' $END").unwrap();
	assert_eq!(nl.strings("LITE_VARS").unwrap(), vec!["UP", "VP", ""]);
}

#[test]
fn lookup_reports_type_mismatch_and_bounds() {
	let nl = parse(&catalog(), "").unwrap();
	assert!(matches!(nl.real("NGRIDS"), Err(crate::LookupError::TypeMismatch { expected: "real", found: "integer", .. })));
	assert!(matches!(nl.int_at("NNXP", 4), Err(crate::LookupError::OutOfBounds { index: 4, len: 4, .. })));
	assert!(matches!(nl.int("NOPE"), Err(crate::LookupError::Unknown(_))));
	assert_eq!(nl.get("RUNTYPE").unwrap().values, vec![Value::Str("INITIAL".into())]);
}
