//! # segclock
//!
//! A cycle-accurate simulation of a digital clock built from synchronous
//! logic: a 1 Hz timebase, two resynchronized setting buttons, a
//! seconds/minutes/hours counter, BCD conversion and a multiplexed
//! six-digit seven-segment display.
//!
//! Every component advances exactly once per simulated clock edge, so the
//! outputs seen here are the levels the pads would carry on real hardware.

pub mod logic;
pub mod clock;
pub mod config;
pub mod sim;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use logic::{to_bcd, encode_digit, decode_segments, Bcd, Polarity};
pub use clock::{Button, ButtonInputs, Clock, Frame, HourMode, Outputs, TimeOfDay};
pub use config::{ClockConfig, ConfigError};
pub use sim::{parse_script, load_script, run_script, Script, ScriptError, ScriptReport};

#[cfg(feature = "tui")]
pub use tui::run_front_panel;
