//! Clocked components of the digital clock.
//!
//! Each component owns its registers and advances once per clock edge:
//! - [`TickGenerator`] - 1 Hz timebase
//! - [`EdgeDetector`] - button synchronizer and rising-edge pulse
//! - [`TimeCore`] - seconds/minutes/hours counters
//! - [`DisplayDriver`] - six-digit seven-segment multiplexer
//! - [`Clock`] - all of the above in one clock domain

pub mod tick;
pub mod button;
pub mod core;
pub mod display;
pub mod system;

pub use tick::TickGenerator;
pub use button::EdgeDetector;
pub use self::core::{CoreInputs, HourMode, ParseTimeError, TimeCore, TimeOfDay};
pub use display::{DisplayDriver, Frame, DIGITS};
pub use system::{display_digits, Button, ButtonInputs, Clock, Frames, Outputs, ParseButtonError};
