//! Timebase: a clock-enable pulse at a sub-multiple of the system clock.

use serde::Serialize;

/// Integer division rounded to the nearest whole cycle, never below 1.
#[inline]
pub(crate) fn divider_period(clock_hz: u64, rate_hz: u64) -> u64 {
    ((clock_hz + rate_hz / 2) / rate_hz).max(1)
}

/// Produces a one-cycle pulse every `period` clock cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickGenerator {
    period: u64,
    counter: u64,
}

impl TickGenerator {
    /// Create a generator for `tick_hz` pulses per second out of `clock_hz`.
    ///
    /// Non-integral ratios are rounded to the nearest cycle; the resulting
    /// drift is not corrected.
    ///
    /// # Panics
    /// Panics if `tick_hz` is zero. [`crate::ClockConfig::validate`] rules that out.
    pub fn new(clock_hz: u64, tick_hz: u64) -> Self {
        assert!(tick_hz > 0, "tick frequency must be non-zero");
        Self::with_period(divider_period(clock_hz, tick_hz))
    }
    
    /// Create a generator with an explicit period in cycles.
    pub fn with_period(period: u64) -> Self {
        Self {
            period: period.max(1),
            counter: 0,
        }
    }
    
    /// Cycles between pulses.
    pub fn period(&self) -> u64 {
        self.period
    }
    
    /// Current divider count (0..period).
    pub fn counter(&self) -> u64 {
        self.counter
    }
    
    /// The pulse for the current cycle.
    #[inline]
    pub fn output(&self) -> bool {
        self.counter == self.period - 1
    }
    
    /// Clock edge. Returns the pulse that was asserted during this cycle.
    #[inline]
    pub fn step(&mut self) -> bool {
        let ce = self.output();
        self.counter = if ce { 0 } else { self.counter + 1 };
        ce
    }
    
    /// Advance `cycles` edges at once. Returns how many pulses were emitted.
    pub fn skip(&mut self, cycles: u64) -> u64 {
        let total = self.counter + cycles % self.period;
        self.counter = total % self.period;
        cycles / self.period + total / self.period
    }
    
    /// Cycles until the next pulse is asserted (0 if it is asserted now).
    pub fn cycles_until_pulse(&self) -> u64 {
        self.period - 1 - self.counter
    }
    
    /// Return the divider to its reset value.
    pub fn reset(&mut self) {
        self.counter = 0;
    }
}
