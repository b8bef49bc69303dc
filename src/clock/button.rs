//! Button rising-edge detection.
//!
//! The raw button line is asynchronous to the system clock. It passes a
//! two-register synchronizer before any other logic samples it, then a
//! third register holds the previous synchronized level so a rising edge
//! can be detected.

use serde::{Serialize, Deserialize};

/// A resynchronizing rising-edge detector for one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeDetector {
    /// First synchronizer stage (may go metastable in hardware).
    meta: bool,
    /// Second synchronizer stage, safe to sample.
    sync: bool,
    /// `sync` delayed by one cycle.
    prev: bool,
}

impl EdgeDetector {
    /// Cycles from the input rising to the pulse being asserted.
    pub const LATENCY: u64 = 2;
    
    /// Create a detector with all registers cleared.
    pub const fn new() -> Self {
        Self {
            meta: false,
            sync: false,
            prev: false,
        }
    }
    
    /// The rising-edge pulse for the current cycle.
    #[inline]
    pub fn output(&self) -> bool {
        self.sync && !self.prev
    }
    
    /// The synchronized input level.
    pub fn level(&self) -> bool {
        self.sync
    }
    
    /// Clock edge, sampling `raw`. Returns the pulse asserted during this cycle.
    #[inline]
    pub fn step(&mut self, raw: bool) -> bool {
        let pulse = self.output();
        self.prev = self.sync;
        self.sync = self.meta;
        self.meta = raw;
        pulse
    }
    
    /// True if every register already holds `raw`, so a constant input
    /// cannot produce a pulse.
    pub fn is_settled(&self, raw: bool) -> bool {
        self.meta == raw && self.sync == raw && self.prev == raw
    }
    
    /// Clear all registers.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_single_press_single_pulse() {
        let mut btn = EdgeDetector::new();
        let mut input = vec![false; 3];
        input.extend(vec![true; 20]);
        
        let pulses: Vec<bool> = input.iter().map(|&raw| btn.step(raw)).collect();
        
        assert_eq!(pulses.iter().filter(|&&p| p).count(), 1);
        // Rises on cycle 3, visible after two synchronizer stages.
        assert!(pulses[3 + EdgeDetector::LATENCY as usize]);
    }
    
    #[test]
    fn test_falling_edge_ignored() {
        let mut btn = EdgeDetector::new();
        for _ in 0..5 {
            btn.step(true);
        }
        let pulses = (0..10).filter(|_| btn.step(false)).count();
        assert_eq!(pulses, 0);
    }
    
    #[test]
    fn test_one_cycle_glitch_still_pulses_once() {
        let mut btn = EdgeDetector::new();
        let input = [true, false, false, false, false];
        let pulses = input.iter().filter(|&&raw| btn.step(raw)).count();
        assert_eq!(pulses, 1);
    }
    
    #[test]
    fn test_repeated_presses() {
        let mut btn = EdgeDetector::new();
        let mut count = 0;
        for _ in 0..4 {
            count += (0..5).filter(|_| btn.step(true)).count();
            count += (0..5).filter(|_| btn.step(false)).count();
        }
        assert_eq!(count, 4);
    }
    
    #[test]
    fn test_settled() {
        let mut btn = EdgeDetector::new();
        assert!(btn.is_settled(false));
        btn.step(true);
        assert!(!btn.is_settled(true));
        btn.step(true);
        btn.step(true);
        assert!(btn.is_settled(true));
    }
}
