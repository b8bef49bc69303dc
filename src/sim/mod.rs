//! Test-bench scripting for the clock.
//!
//! A stimulus script drives the button lines and the passage of time, and
//! checks the display along the way:
//!
//! ```text
//! ; set the clock to 01:30 and let it run
//! press hours
//! ticks 30          ; thirty timebase ticks
//! hold minutes      ; keep the line high...
//! cycles 10
//! release minutes   ; ...one press however long it is held
//! expect 01:01:30
//! expect-digits 010130
//! ```

pub mod script;
pub mod runner;

pub use script::{load_script, parse_script, Command, Script, ScriptError};
pub use runner::{run_script, ScriptReport};
