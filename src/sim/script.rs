//! Stimulus script parser.
//!
//! - One command per line
//! - `;` starts a comment, blank lines are ignored
//! - Commands and button names are case-insensitive

use crate::clock::core::TimeOfDay;
use crate::clock::display::DIGITS;
use crate::clock::system::Button;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Cycles a `press` holds the button when no duration is given.
pub const DEFAULT_HOLD_CYCLES: u64 = 4;

/// One test-bench command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Step N clock edges.
    Cycles(u64),
    /// Run until N more timebase ticks have been applied.
    Ticks(u64),
    /// Run for N seconds of wall-clock time.
    Seconds(u64),
    /// Press and release a button.
    Press { button: Button, hold: u64 },
    /// Drive a button line high until released.
    Hold(Button),
    /// Drive a button line low.
    Release(Button),
    /// Asynchronous reset.
    Reset,
    /// Check the core time.
    Expect(TimeOfDay),
    /// Check the display digits, seconds ones first.
    ExpectDigits([u8; DIGITS]),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Cycles(n) => write!(f, "cycles {}", n),
            Command::Ticks(n) => write!(f, "ticks {}", n),
            Command::Seconds(n) => write!(f, "seconds {}", n),
            Command::Press { button, hold } => write!(f, "press {} {}", button, hold),
            Command::Hold(button) => write!(f, "hold {}", button),
            Command::Release(button) => write!(f, "release {}", button),
            Command::Reset => write!(f, "reset"),
            Command::Expect(time) => write!(f, "expect {}", time),
            Command::ExpectDigits(digits) => {
                write!(f, "expect-digits ")?;
                digits.iter().rev().try_for_each(|d| write!(f, "{}", d))
            }
        }
    }
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    /// Commands with the source line they came from.
    pub commands: Vec<(usize, Command)>,
}

impl Script {
    pub fn len(&self) -> usize {
        self.commands.len()
    }
    
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Parse script source text.
pub fn parse_script(source: &str) -> Result<Script, ScriptError> {
    let mut script = Script::default();
    
    for (line_num, line) in source.lines().enumerate() {
        let line = match line.find(';') {
            Some(idx) => &line[..idx],
            None => line,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        
        let command = parse_command(&parts, line_num + 1)?;
        script.commands.push((line_num + 1, command));
    }
    
    Ok(script)
}

/// Load a script from disk.
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Script, ScriptError> {
    let source = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ScriptError::Io(e.to_string()))?;
    parse_script(&source)
}

fn parse_command(parts: &[&str], line: usize) -> Result<Command, ScriptError> {
    let syntax = |message: String| ScriptError::Syntax { line, message };
    
    let keyword = parts[0].to_ascii_lowercase();
    let operand = parts.get(1).copied();
    
    let expected_args = match keyword.as_str() {
        "reset" => 0,
        "press" => 2,
        _ => 1,
    };
    if parts.len() > expected_args + 1 {
        return Err(syntax(format!("too many operands for {}", keyword)));
    }
    
    let require = |what: &str| operand.ok_or_else(|| syntax(format!("{} requires {}", keyword, what)));
    let count = |s: &str| -> Result<u64, ScriptError> {
        s.replace('_', "")
            .parse()
            .map_err(|_| syntax(format!("invalid count {:?}", s)))
    };
    let button = |s: &str| -> Result<Button, ScriptError> {
        s.parse().map_err(|e| syntax(format!("{}", e)))
    };
    
    let command = match keyword.as_str() {
        "cycles" => Command::Cycles(count(require("a cycle count")?)?),
        "ticks" => Command::Ticks(count(require("a tick count")?)?),
        "seconds" => Command::Seconds(count(require("a number of seconds")?)?),
        "press" => {
            let button = button(require("a button")?)?;
            let hold = match parts.get(2).copied() {
                Some(s) => count(s)?,
                None => DEFAULT_HOLD_CYCLES,
            };
            if hold == 0 {
                return Err(syntax("press must hold for at least one cycle".into()));
            }
            Command::Press { button, hold }
        }
        "hold" => Command::Hold(button(require("a button")?)?),
        "release" => Command::Release(button(require("a button")?)?),
        "reset" => Command::Reset,
        "expect" => {
            let time = require("a time")?
                .parse::<TimeOfDay>()
                .map_err(|e| syntax(format!("{}", e)))?;
            Command::Expect(time)
        }
        "expect-digits" => Command::ExpectDigits(parse_digits(require("six digits")?, line)?),
        other => return Err(syntax(format!("unknown command {:?}", other))),
    };
    
    Ok(command)
}

/// Parse digits written as shown on the display, hours tens first.
fn parse_digits(s: &str, line: usize) -> Result<[u8; DIGITS], ScriptError> {
    let chars: Vec<char> = s.chars().filter(|c| *c != ':').collect();
    if chars.len() != DIGITS {
        return Err(ScriptError::Syntax {
            line,
            message: format!("expected {} digits, found {}", DIGITS, chars.len()),
        });
    }
    
    let mut digits = [0u8; DIGITS];
    for (slot, c) in digits.iter_mut().zip(chars.iter().rev()) {
        *slot = c.to_digit(10).ok_or_else(|| ScriptError::Syntax {
            line,
            message: format!("invalid digit {:?}", c),
        })? as u8;
    }
    Ok(digits)
}

/// Errors from loading or running a script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("I/O error: {0}")]
    Io(String),
    
    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },
    
    #[error("line {line}: expected {expected}, found {actual}")]
    Expectation { line: usize, expected: String, actual: String },
}
