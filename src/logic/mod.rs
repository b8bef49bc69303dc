//! Combinational logic primitives.
//!
//! Everything in this module is a pure function of its inputs, recomputed
//! on every cycle with no registered state:
//! - [`Bcd`] - binary to tens/ones decimal split
//! - [`encode_digit`] - 4-bit value to `abcdefg` segment pattern
//! - [`Polarity`] - active-high / active-low pad conversion

pub mod bcd;
pub mod segments;

pub use bcd::{to_bcd, Bcd};
pub use segments::{decode_segments, encode_digit, Polarity, BLANK, SEGMENT_TABLE};
