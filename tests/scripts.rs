//! Runs the bundled stimulus scripts against both clock timings.

use segclock::{load_script, run_script, Clock, ClockConfig, TimeOfDay};

const SCENARIO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/scripts/scenario.stim");

#[test]
fn scenario_passes_with_simulation_timing() {
    let script = load_script(SCENARIO).unwrap();
    let mut clock = Clock::new(ClockConfig::simulation()).unwrap();

    let report = run_script(&mut clock, &script).unwrap();
    assert_eq!(report.expectations, 6);
    assert_eq!(report.final_time, TimeOfDay::new(0, 1, 3));
}

#[test]
fn scenario_passes_with_board_timing() {
    let script = load_script(SCENARIO).unwrap();
    let mut clock = Clock::new(ClockConfig::default()).unwrap();

    let report = run_script(&mut clock, &script).unwrap();
    assert!(report.cycles > 86_400 * ClockConfig::default().clock_hz);
}

#[test]
fn missing_script_is_io_error() {
    let err = load_script("does/not/exist.stim").unwrap_err();
    assert!(matches!(err, segclock::ScriptError::Io(_)));
}
