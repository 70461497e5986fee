use rstest::rstest;

use super::*;

#[rstest]
#[case(0.0, true)]
#[case(50.0, false)]
#[case(60.0, true)]
#[case(70.0, false)]
#[case(120.0, true)]
fn aligned_steps(#[case] time: f64, #[case] due: bool) {
	let schedule = OutputSchedule::new(60.0, 0.0, 0.0);
	assert_eq!(schedule.due(time, 10.0).history, due);
}

#[rstest]
#[case(50.0, true)]
#[case(75.0, false)]
#[case(100.0, false)]
#[case(125.0, true)]
fn steps_that_straddle_an_interval(#[case] time: f64, #[case] due: bool) {
	let schedule = OutputSchedule::new(0.0, 60.0, 0.0);
	assert_eq!(schedule.due(time, 25.0).lite, due);
}

#[test]
fn zero_interval_disables() {
	let schedule = OutputSchedule::new(0.0, 0.0, 0.0);
	for time in [0.0, 60.0, 3600.0] {
		assert!(!schedule.due(time, 10.0).any());
	}
}

#[test]
fn streams_are_independent() {
	let schedule = OutputSchedule::new(3600.0, 600.0, 1800.0);
	assert_eq!(schedule.due(600.0, 30.0), Due { history: false, lite: true, mean: false });
	assert_eq!(schedule.due(1800.0, 30.0), Due { history: false, lite: true, mean: true });
	assert_eq!(schedule.due(3600.0, 30.0), Due { history: true, lite: true, mean: true });
}
