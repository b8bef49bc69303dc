//! Binary to BCD conversion.
//!
//! Splits a bounded binary time field (0-59 or 0-23) into its decimal
//! tens and ones digits. The hardware version is a small lookup; here it
//! is plain division, which is bit-exact over the whole input range.

use serde::{Serialize, Deserialize};
use std::fmt;

/// Largest value with a two-digit decimal representation.
pub const BCD_MAX: u8 = 99;

/// A pair of decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Bcd {
    /// Tens digit (0-9).
    pub tens: u8,
    /// Ones digit (0-9).
    pub ones: u8,
}

impl Bcd {
    /// Recombine the digits into the binary value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.tens * 10 + self.ones
    }
    
    /// Digits in display order: ones first, then tens.
    #[inline]
    pub const fn digits(self) -> [u8; 2] {
        [self.ones, self.tens]
    }
}

impl fmt::Display for Bcd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tens, self.ones)
    }
}

/// Convert a binary value to BCD.
///
/// # Panics
/// Panics if `value` is larger than [`BCD_MAX`]. Time fields never are.
#[inline]
pub fn to_bcd(value: u8) -> Bcd {
    assert!(value <= BCD_MAX, "Value {} out of range for two BCD digits", value);
    Bcd {
        tens: value / 10,
        ones: value % 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_bcd_zero() {
        assert_eq!(to_bcd(0), Bcd { tens: 0, ones: 0 });
    }
    
    #[test]
    fn test_bcd_minutes_range() {
        for v in 0..60u8 {
            let bcd = to_bcd(v);
            assert_eq!(bcd.value(), v);
            assert!(bcd.tens <= 5);
            assert!(bcd.ones <= 9);
        }
    }
    
    #[test]
    fn test_bcd_hours_range() {
        for v in 0..24u8 {
            let bcd = to_bcd(v);
            assert_eq!(bcd.tens * 10 + bcd.ones, v);
            assert!(bcd.tens <= 2);
        }
    }
    
    #[test]
    fn test_bcd_display_order() {
        let bcd = to_bcd(47);
        assert_eq!(bcd.digits(), [7, 4]);
        assert_eq!(bcd.to_string(), "47");
    }
    
    #[test]
    #[should_panic]
    fn test_bcd_out_of_range() {
        to_bcd(100);
    }
}
