//! Multiplexed seven-segment display driver.
//!
//! Six digits share one segment bus. A refresh divider selects one digit
//! at a time through a one-hot chip-select strobe while the segment bus
//! carries that digit's pattern. Cycling fast enough makes all six
//! appear lit together.

use crate::clock::tick::divider_period;
use crate::logic::segments::{encode_digit, Polarity, SEGMENT_BITS};
use serde::{Serialize, Deserialize};

/// Number of multiplexed digit positions.
pub const DIGITS: usize = 6;

/// Width of the chip-select bus.
pub const CS_BITS: u32 = DIGITS as u32;

/// Display output for one clock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Active digit position (0 = seconds ones ... 5 = hours tens).
    pub index: u8,
    /// Decimal value routed to the segment bus.
    pub value: u8,
    /// Chip-select pad levels.
    pub cs: u8,
    /// Segment pad levels, `abcdefg` with `a` in bit 0.
    pub segments: u8,
}

/// Round-robin digit multiplexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayDriver {
    /// Cycles each digit stays selected.
    period: u64,
    divider: u64,
    index: u8,
    cs_polarity: Polarity,
    segment_polarity: Polarity,
}

impl DisplayDriver {
    /// Create a driver refreshing all six digits `refresh_hz` times per second.
    ///
    /// # Panics
    /// Panics if `refresh_hz` is zero.
    pub fn new(
        clock_hz: u64,
        refresh_hz: u64,
        cs_polarity: Polarity,
        segment_polarity: Polarity,
    ) -> Self {
        assert!(refresh_hz > 0, "refresh rate must be non-zero");
        let period = divider_period(clock_hz, refresh_hz * DIGITS as u64);
        Self::with_period(period, cs_polarity, segment_polarity)
    }
    
    /// Create a driver holding each digit for `period` cycles.
    pub fn with_period(period: u64, cs_polarity: Polarity, segment_polarity: Polarity) -> Self {
        Self {
            period: period.max(1),
            divider: 0,
            index: 0,
            cs_polarity,
            segment_polarity,
        }
    }
    
    /// Cycles each digit stays selected.
    pub fn period(&self) -> u64 {
        self.period
    }
    
    /// Cycles for one full refresh of all digits.
    pub fn frame_cycles(&self) -> u64 {
        self.period * DIGITS as u64
    }
    
    /// Currently selected digit position.
    pub fn index(&self) -> u8 {
        self.index
    }
    
    pub fn cs_polarity(&self) -> Polarity {
        self.cs_polarity
    }
    
    pub fn segment_polarity(&self) -> Polarity {
        self.segment_polarity
    }
    
    /// Combinational outputs for the current cycle given the six digit values.
    pub fn output(&self, values: &[u8; DIGITS]) -> Frame {
        self.output_at(self.index, values)
    }
    
    /// The outputs the driver produces while digit `index` is selected.
    ///
    /// # Panics
    /// Panics if `index` is not a digit position.
    pub fn output_at(&self, index: u8, values: &[u8; DIGITS]) -> Frame {
        let value = values[index as usize];
        let cs = 1u8 << index;
        Frame {
            index,
            value,
            cs: self.cs_polarity.apply(cs, CS_BITS),
            segments: self.segment_polarity.apply(encode_digit(value), SEGMENT_BITS),
        }
    }
    
    /// Clock edge. Returns true if the active digit advanced.
    #[inline]
    pub fn step(&mut self) -> bool {
        let advance = self.divider == self.period - 1;
        if advance {
            self.divider = 0;
            self.index = (self.index + 1) % DIGITS as u8;
        } else {
            self.divider += 1;
        }
        advance
    }
    
    /// Advance `cycles` edges at once.
    pub fn skip(&mut self, cycles: u64) {
        let total = self.divider + cycles % self.period;
        self.divider = total % self.period;
        let advances = (cycles / self.period) % DIGITS as u64 + total / self.period;
        self.index = ((self.index as u64 + advances) % DIGITS as u64) as u8;
    }
    
    /// Return to digit 0 with a cleared divider.
    pub fn reset(&mut self) {
        self.divider = 0;
        self.index = 0;
    }
}

impl Frame {
    /// Logical chip-select: the active digit's bit is set.
    pub fn cs_logical(&self, polarity: Polarity) -> u8 {
        polarity.logical(self.cs, CS_BITS)
    }
    
    /// Logical segment pattern: lit segments are set.
    pub fn segments_logical(&self, polarity: Polarity) -> u8 {
        polarity.logical(self.segments, SEGMENT_BITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::segments::SEGMENT_TABLE;
    
    const VALUES: [u8; DIGITS] = [3, 2, 9, 5, 1, 0];
    
    fn high() -> DisplayDriver {
        DisplayDriver::with_period(3, Polarity::ActiveHigh, Polarity::ActiveHigh)
    }
    
    #[test]
    fn test_period_from_rates() {
        let drv = DisplayDriver::new(6_000, 100, Polarity::ActiveLow, Polarity::ActiveLow);
        assert_eq!(drv.period(), 10);
        assert_eq!(drv.frame_cycles(), 60);
    }
    
    #[test]
    fn test_round_robin_over_full_refresh() {
        let mut drv = high();
        let mut seen = Vec::new();
        for _ in 0..drv.frame_cycles() {
            let frame = drv.output(&VALUES);
            if seen.last() != Some(&frame.cs) {
                seen.push(frame.cs);
            }
            assert_eq!(frame.segments, SEGMENT_TABLE[VALUES[frame.index as usize] as usize]);
            drv.step();
        }
        assert_eq!(seen, [0b000001, 0b000010, 0b000100, 0b001000, 0b010000, 0b100000]);
        assert_eq!(drv.index(), 0);
    }
    
    #[test]
    fn test_each_slot_lasts_one_period() {
        let mut drv = high();
        let mut counts = [0u64; DIGITS];
        for _ in 0..drv.frame_cycles() {
            counts[drv.output(&VALUES).index as usize] += 1;
            drv.step();
        }
        assert_eq!(counts, [3; DIGITS]);
    }
    
    #[test]
    fn test_active_low_pads() {
        let drv = DisplayDriver::with_period(1, Polarity::ActiveLow, Polarity::ActiveLow);
        let frame = drv.output(&[1, 0, 0, 0, 0, 0]);
        assert_eq!(frame.cs, 0b111110);
        assert_eq!(frame.segments, !0x06 & 0x7F);
        assert_eq!(frame.cs_logical(Polarity::ActiveLow), 0b000001);
        assert_eq!(frame.segments_logical(Polarity::ActiveLow), 0x06);
    }
    
    #[test]
    fn test_skip_matches_step() {
        let mut stepped = high();
        let mut skipped = high();
        for _ in 0..50 {
            stepped.step();
        }
        skipped.skip(50);
        assert_eq!(stepped, skipped);
    }
    
    #[test]
    fn test_skip_huge_cycle_count() {
        let mut drv = high();
        drv.skip(2);
        drv.skip(u64::MAX);
        let total = u64::MAX as u128 + 2;
        assert_eq!(drv.index() as u128, (total / 3) % DIGITS as u128);
        assert_eq!(drv.output(&VALUES).value, VALUES[drv.index() as usize]);
    }
}
