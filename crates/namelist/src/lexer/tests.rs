use pretty_assertions::assert_eq;

use super::*;

fn texts(stmt: &Statement) -> Vec<&str> {
	stmt.values.iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn scans_statements_in_order() {
	let stmts = scan("$MODEL_GRIDS\n  NGRIDS = 2,\n  deltax = 1000.\n$END\n").unwrap();
	assert_eq!(stmts.len(), 2);
	assert_eq!(stmts[0].group, "MODEL_GRIDS");
	assert_eq!(stmts[0].name, "NGRIDS");
	assert_eq!(stmts[0].line, 2);
	assert_eq!(texts(&stmts[0]), vec!["2"]);
	assert_eq!(stmts[1].name, "DELTAX");
	assert_eq!(texts(&stmts[1]), vec!["1000."]);
	assert_eq!(stmts[1].line, 3);
}

#[test]
fn values_continue_until_next_assignment() {
	let stmts = scan("$G\n NNXP = 42, 34,\n        26\n NNYP = 1 $END").unwrap();
	assert_eq!(texts(&stmts[0]), vec!["42", "34", "26"]);
	assert_eq!(stmts[0].values[2].line, 3);
	assert_eq!(texts(&stmts[1]), vec!["1"]);
}

#[test]
fn whitespace_separates_values_without_commas() {
	let stmts = scan("$G A = 1 2 3 $END").unwrap();
	assert_eq!(texts(&stmts[0]), vec!["1", "2", "3"]);
}

#[test]
fn repeat_count_stays_on_the_token() {
	let stmts = scan("$G NNXP = 3*42, 7 $END").unwrap();
	assert_eq!(texts(&stmts[0]), vec!["42", "7"]);
	let repeats: Vec<_> = stmts[0].values.iter().map(|t| t.repeat).collect();
	assert_eq!(repeats, vec![3, 1]);
}

#[test]
fn repeat_count_applies_to_quoted_values() {
	let stmts = scan("$G LITE_VARS = 2*'UP' $END").unwrap();
	assert_eq!(stmts[0].values, vec![Token { text: "UP".into(), quoted: true, repeat: 2, line: 1 }]);
}

#[test]
fn huge_repeat_count_is_not_expanded() {
	let stmts = scan("$G NNXP = 4000000000*10 $END").unwrap();
	assert_eq!(stmts[0].values.len(), 1);
	assert_eq!(stmts[0].values[0].repeat, 4_000_000_000);
}

#[test]
fn dollar_outside_a_section_is_ignored() {
	let stmts = scan("costs $5, or $ 6\n$G A = 1 $END\ntrailing $ sign").unwrap();
	assert_eq!(stmts.len(), 1);
	assert_eq!(stmts[0].name, "A");
}

#[test]
fn zero_repeat_count_is_rejected() {
	assert!(matches!(scan("$G A = 0*1 $END"), Err(NamelistError::Syntax { .. })));
}

#[test]
fn quoted_strings_keep_spaces_and_doubled_quotes() {
	let stmts = scan("$G TITLE = 'squall line', \"it''s\" $END").unwrap();
	assert_eq!(texts(&stmts[0]), vec!["squall line", "it''s"]);
	let stmts = scan("$G TITLE = 'it''s' $END").unwrap();
	assert_eq!(texts(&stmts[0]), vec!["it's"]);
}

#[test]
fn bare_word_value_stops_before_next_name() {
	let stmts = scan("$G RUNTYPE = INITIAL NGRIDS = 1 $END").unwrap();
	assert_eq!(texts(&stmts[0]), vec!["INITIAL"]);
	assert_eq!(stmts[1].name, "NGRIDS");
}

#[test]
fn comments_and_outside_text_are_ignored() {
	let text = "Run description, not part of any group.\n! $NOT_A_GROUP\n$G ! trailing comment\n A = 1 ! one\n$END\nfooter text\n";
	let stmts = scan(text).unwrap();
	assert_eq!(stmts.len(), 1);
	assert_eq!(texts(&stmts[0]), vec!["1"]);
}

#[test]
fn end_marker_is_case_insensitive() {
	let stmts = scan("$model_options iuvwtend = 1 $end").unwrap();
	assert_eq!(stmts[0].group, "MODEL_OPTIONS");
	assert_eq!(stmts[0].name, "IUVWTEND");
}

#[test]
fn missing_end_is_unterminated() {
	assert_eq!(
		scan("$G\n A = 1\n").unwrap_err(),
		NamelistError::UnterminatedGroup { group: "G".into(), line: 1 }
	);
}

#[test]
fn new_group_before_end_is_unterminated() {
	assert!(matches!(
		scan("$G A = 1\n$H B = 2 $END"),
		Err(NamelistError::UnterminatedGroup { group, line: 2 }) if group == "G"
	));
}

#[test]
fn stray_end_is_a_syntax_error() {
	assert!(matches!(scan("$END"), Err(NamelistError::Syntax { .. })));
}

#[test]
fn statement_without_value_is_a_syntax_error() {
	assert!(matches!(scan("$G A = $END"), Err(NamelistError::Syntax { line: 1, .. })));
}

#[test]
fn statement_without_equals_is_a_syntax_error() {
	assert!(matches!(scan("$G A 1 $END"), Err(NamelistError::Syntax { .. })));
}

#[test]
fn unterminated_string_is_reported() {
	assert!(matches!(scan("$G A = 'open\n$END"), Err(NamelistError::Syntax { line: 1, .. })));
}
