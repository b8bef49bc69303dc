//! Seven-segment encoding.
//!
//! Patterns use the `abcdefg` bus layout: bit 0 drives segment `a`,
//! bit 6 drives segment `g`.
//!
//! ```text
//!     aaa
//!    f   b
//!     ggg
//!    e   c
//!     ddd
//! ```

use serde::{Serialize, Deserialize};

/// Width of the segment bus.
pub const SEGMENT_BITS: u32 = 7;

/// All segments off.
pub const BLANK: u8 = 0b000_0000;

/// Segment patterns for the 16 values of a 4-bit digit (0-9, then A-F).
pub const SEGMENT_TABLE: [u8; 16] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
    0b111_0111, // A
    0b111_1100, // b
    0b011_1001, // C
    0b101_1110, // d
    0b111_1001, // E
    0b111_0001, // F
];

/// Encode a digit value as an active-high segment pattern.
///
/// Values outside the 4-bit range are shown blank.
#[inline]
pub fn encode_digit(value: u8) -> u8 {
    SEGMENT_TABLE
        .get(value as usize)
        .copied()
        .unwrap_or(BLANK)
}

/// Reverse lookup of an active-high segment pattern.
///
/// Returns `None` for a blank or unrecognized pattern.
pub fn decode_segments(pattern: u8) -> Option<u8> {
    SEGMENT_TABLE
        .iter()
        .position(|&p| p == pattern & 0x7F)
        .map(|i| i as u8)
}

/// Electrical polarity of an output bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Polarity {
    /// A set bit lights the segment / selects the digit.
    ActiveHigh,
    /// A cleared bit lights the segment / selects the digit.
    #[default]
    ActiveLow,
}

impl Polarity {
    /// Convert a logical (active-high) bus value to pad levels.
    #[inline]
    pub const fn apply(self, value: u8, width: u32) -> u8 {
        let mask = ((1u16 << width) - 1) as u8;
        match self {
            Polarity::ActiveHigh => value & mask,
            Polarity::ActiveLow => !value & mask,
        }
    }
    
    /// Convert pad levels back to the logical value. Inversion is its own inverse.
    #[inline]
    pub const fn logical(self, pads: u8, width: u32) -> u8 {
        self.apply(pads, width)
    }
}

/// Whether segment `seg` (0 = a ... 6 = g) is lit in an active-high pattern.
#[inline]
pub const fn segment_lit(pattern: u8, seg: u8) -> bool {
    pattern & (1 << seg) != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_known_patterns() {
        assert_eq!(encode_digit(0), 0x3F);
        assert_eq!(encode_digit(1), 0x06);
        assert_eq!(encode_digit(8), 0x7F);
        assert_eq!(encode_digit(9), 0x6F);
    }
    
    #[test]
    fn test_out_of_range_is_blank() {
        assert_eq!(encode_digit(16), BLANK);
        assert_eq!(encode_digit(255), BLANK);
    }
    
    #[test]
    fn test_patterns_are_distinct() {
        for (i, a) in SEGMENT_TABLE.iter().enumerate() {
            for b in &SEGMENT_TABLE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
    
    #[test]
    fn test_decode_inverts_encode() {
        for v in 0..16u8 {
            assert_eq!(decode_segments(encode_digit(v)), Some(v));
        }
        assert_eq!(decode_segments(BLANK), None);
    }
    
    #[test]
    fn test_polarity() {
        assert_eq!(Polarity::ActiveHigh.apply(0b000_0110, SEGMENT_BITS), 0b000_0110);
        assert_eq!(Polarity::ActiveLow.apply(0b000_0110, SEGMENT_BITS), 0b111_1001);
        assert_eq!(Polarity::ActiveLow.apply(0b00_0001, 6), 0b11_1110);
        assert_eq!(Polarity::ActiveLow.logical(0b11_1110, 6), 0b00_0001);
    }
    
    #[test]
    fn test_segment_lit() {
        let one = encode_digit(1);
        assert!(!segment_lit(one, 0));
        assert!(segment_lit(one, 1));
        assert!(segment_lit(one, 2));
        assert!(!segment_lit(one, 6));
    }
}
