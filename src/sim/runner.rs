//! Executes stimulus scripts against a clock.

use crate::clock::core::TimeOfDay;
use crate::clock::system::{display_digits, ButtonInputs, Clock};
use crate::sim::script::{Command, Script, ScriptError};
use serde::{Serialize, Deserialize};
use tracing::{debug, info};

/// Summary of a completed script run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptReport {
    /// Commands executed.
    pub commands: usize,
    /// Expectations checked (all passed).
    pub expectations: usize,
    /// Button pulses produced by `press` commands.
    pub presses: u64,
    /// Clock cycles since the last reset.
    pub cycles: u64,
    /// Core time at the end of the script.
    pub final_time: TimeOfDay,
}

/// Run `script` on `clock`, stopping at the first failed expectation.
///
/// Button lines driven by `hold` stay high for every following command
/// until a matching `release`.
pub fn run_script(clock: &mut Clock, script: &Script) -> Result<ScriptReport, ScriptError> {
    let mut inputs = ButtonInputs::IDLE;
    let mut expectations = 0;
    let mut presses = 0;
    
    for &(line, command) in &script.commands {
        debug!(line, %command, cycle = clock.cycles(), "script command");
        
        match command {
            Command::Cycles(n) => {
                clock.fast_forward(n, inputs);
            }
            Command::Ticks(n) => {
                clock.advance_ticks(n, inputs);
            }
            Command::Seconds(n) => {
                clock.advance_seconds(n, inputs);
            }
            Command::Press { button, hold } => {
                presses += clock.press_over(inputs, button, hold);
            }
            Command::Hold(button) => inputs.set(button, true),
            Command::Release(button) => inputs.set(button, false),
            Command::Reset => {
                clock.reset();
                inputs = ButtonInputs::IDLE;
            }
            Command::Expect(expected) => {
                expectations += 1;
                let actual = clock.time();
                if actual != expected {
                    return Err(ScriptError::Expectation {
                        line,
                        expected: expected.to_string(),
                        actual: actual.to_string(),
                    });
                }
            }
            Command::ExpectDigits(expected) => {
                expectations += 1;
                let actual = display_digits(clock.time());
                if actual != expected {
                    return Err(ScriptError::Expectation {
                        line,
                        expected: format_digits(&expected),
                        actual: format_digits(&actual),
                    });
                }
            }
        }
    }
    
    let report = ScriptReport {
        commands: script.len(),
        expectations,
        presses,
        cycles: clock.cycles(),
        final_time: clock.time(),
    };
    info!(
        commands = report.commands,
        expectations = report.expectations,
        time = %report.final_time,
        "script complete"
    );
    Ok(report)
}

/// Digits as read off the display, hours tens first.
fn format_digits(digits: &[u8]) -> String {
    digits.iter().rev().map(|d| d.to_string()).collect()
}
