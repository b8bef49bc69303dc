//! Time core: the seconds/minutes/hours counter state machine.
//!
//! Every cycle the core observes three event lines - the timebase tick and
//! the two button pulses - and produces its next state. Carries ripple
//! within the same cycle: seconds wrapping at 60 bumps minutes, minutes
//! wrapping at 60 bumps hours, hours wrap at the configured modulus.

use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, trace};

/// Seconds per minute and minutes per hour.
pub const SIXTY: u8 = 60;

/// Hour wraparound, fixed when the clock is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HourMode {
    /// Hours count 0-23.
    #[default]
    #[serde(rename = "24")]
    TwentyFour,
    /// Hours count 0-11.
    #[serde(rename = "12")]
    Twelve,
}

impl HourMode {
    /// The value at which hours wrap to zero.
    #[inline]
    pub const fn modulus(self) -> u8 {
        match self {
            HourMode::TwentyFour => 24,
            HourMode::Twelve => 12,
        }
    }
    
    /// Seconds in one full cycle of the clock.
    pub const fn cycle_seconds(self) -> u64 {
        self.modulus() as u64 * 3600
    }
}

/// A time value as held by the core registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    /// Midnight, the reset value.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay::new(0, 0, 0);
    
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self { hours, minutes, seconds }
    }
    
    /// Seconds since midnight.
    pub fn total_seconds(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }
    
    /// Build from seconds since midnight, wrapping at the mode's cycle length.
    pub fn from_total_seconds(total: u64, mode: HourMode) -> Self {
        let total = total % mode.cycle_seconds();
        Self {
            hours: (total / 3600) as u8,
            minutes: (total / 60 % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }
    
    /// True if every field lies within its range for `mode`.
    pub fn is_valid(&self, mode: HourMode) -> bool {
        self.hours < mode.modulus() && self.minutes < SIXTY && self.seconds < SIXTY
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;
    
    /// Parse `HH:MM:SS`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(':').collect();
        if fields.len() != 3 {
            return Err(ParseTimeError::Format(s.to_string()));
        }
        
        let mut parsed = [0u8; 3];
        for (slot, field) in parsed.iter_mut().zip(&fields) {
            *slot = field
                .parse()
                .map_err(|_| ParseTimeError::Format(s.to_string()))?;
        }
        let [hours, minutes, seconds] = parsed;
        
        if hours >= 24 {
            return Err(ParseTimeError::OutOfRange { field: "hours", value: hours });
        }
        if minutes >= SIXTY {
            return Err(ParseTimeError::OutOfRange { field: "minutes", value: minutes });
        }
        if seconds >= SIXTY {
            return Err(ParseTimeError::OutOfRange { field: "seconds", value: seconds });
        }
        
        Ok(Self::new(hours, minutes, seconds))
    }
}

/// Errors from parsing a time string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimeError {
    #[error("expected HH:MM:SS, found {0:?}")]
    Format(String),
    
    #[error("{field} value {value} out of range")]
    OutOfRange { field: &'static str, value: u8 },
}

/// Event lines sampled by the core on a clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoreInputs {
    /// Timebase pulse: one second has elapsed.
    pub tick: bool,
    /// Button pulse: add one minute.
    pub inc_minutes: bool,
    /// Button pulse: add one hour.
    pub inc_hours: bool,
}

impl CoreInputs {
    /// Only the timebase tick.
    pub const TICK: CoreInputs = CoreInputs { tick: true, inc_minutes: false, inc_hours: false };
    
    /// True if no event line is asserted.
    pub fn is_idle(&self) -> bool {
        !(self.tick || self.inc_minutes || self.inc_hours)
    }
}

/// The time-counting state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeCore {
    time: TimeOfDay,
    mode: HourMode,
}

impl TimeCore {
    /// Create a core at its reset value, midnight.
    pub fn new(mode: HourMode) -> Self {
        Self {
            time: TimeOfDay::MIDNIGHT,
            mode,
        }
    }
    
    /// Registered outputs for the current cycle.
    #[inline]
    pub fn time(&self) -> TimeOfDay {
        self.time
    }
    
    pub fn mode(&self) -> HourMode {
        self.mode
    }
    
    /// Clock edge.
    ///
    /// Events that land on the same field in the same cycle add up: a
    /// seconds carry and a minute button press together advance minutes by
    /// two. The sum for each field is wrapped once, and a wrap carries
    /// exactly one into the next field.
    ///
    /// Returns the time that was visible during this cycle.
    pub fn step(&mut self, inputs: CoreInputs) -> TimeOfDay {
        let current = self.time;
        if inputs.is_idle() {
            return current;
        }
        
        let TimeOfDay { hours, minutes, seconds } = current;
        
        let seconds_sum = seconds + inputs.tick as u8;
        let carry_s = seconds_sum >= SIXTY;
        
        let minutes_sum = minutes + carry_s as u8 + inputs.inc_minutes as u8;
        let carry_m = minutes_sum >= SIXTY;
        if carry_m {
            trace!(hours, "minutes wrapped");
        }
        
        let modulus = self.mode.modulus();
        let hours_sum = hours + carry_m as u8 + inputs.inc_hours as u8;
        if hours_sum >= modulus {
            debug!(modulus, "hours wrapped");
        }
        
        self.time = TimeOfDay {
            hours: hours_sum % modulus,
            minutes: minutes_sum % SIXTY,
            seconds: seconds_sum % SIXTY,
        };
        current
    }
    
    /// Apply `ticks` timebase pulses with no button activity.
    pub fn advance_seconds(&mut self, ticks: u64) {
        if ticks == 0 {
            return;
        }
        let total = self.time.total_seconds() + ticks % self.mode.cycle_seconds();
        self.time = TimeOfDay::from_total_seconds(total, self.mode);
    }
    
    /// Return to midnight.
    pub fn reset(&mut self) {
        self.time = TimeOfDay::MIDNIGHT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    fn tick(core: &mut TimeCore, n: usize) {
        for _ in 0..n {
            core.step(CoreInputs::TICK);
        }
    }
    
    #[test]
    fn test_reset_value() {
        let core = TimeCore::new(HourMode::TwentyFour);
        assert_eq!(core.time(), TimeOfDay::MIDNIGHT);
    }
    
    #[test]
    fn test_sixty_ticks_carry_one_minute() {
        let mut core = TimeCore::new(HourMode::TwentyFour);
        tick(&mut core, 60);
        assert_eq!(core.time(), TimeOfDay::new(0, 1, 0));
    }
    
    #[test]
    fn test_full_day_returns_to_midnight() {
        let mut core = TimeCore::new(HourMode::TwentyFour);
        tick(&mut core, 24 * 60 * 60);
        assert_eq!(core.time(), TimeOfDay::MIDNIGHT);
    }
    
    #[test]
    fn test_twelve_hour_wrap() {
        let mut core = TimeCore::new(HourMode::Twelve);
        tick(&mut core, 12 * 60 * 60 - 1);
        assert_eq!(core.time(), TimeOfDay::new(11, 59, 59));
        tick(&mut core, 1);
        assert_eq!(core.time(), TimeOfDay::MIDNIGHT);
    }
    
    #[test]
    fn test_step_returns_previous_state() {
        let mut core = TimeCore::new(HourMode::TwentyFour);
        assert_eq!(core.step(CoreInputs::TICK), TimeOfDay::MIDNIGHT);
        assert_eq!(core.step(CoreInputs::default()), TimeOfDay::new(0, 0, 1));
    }
    
    #[test]
    fn test_minute_button_carries_into_hours() {
        let mut core = TimeCore::new(HourMode::TwentyFour);
        for _ in 0..59 {
            core.step(CoreInputs { inc_minutes: true, ..Default::default() });
        }
        assert_eq!(core.time(), TimeOfDay::new(0, 59, 0));
        core.step(CoreInputs { inc_minutes: true, ..Default::default() });
        assert_eq!(core.time(), TimeOfDay::new(1, 0, 0));
    }
    
    #[test]
    fn test_hour_button_wraps_without_touching_minutes() {
        let mut core = TimeCore::new(HourMode::TwentyFour);
        tick(&mut core, 75);
        for _ in 0..24 {
            core.step(CoreInputs { inc_hours: true, ..Default::default() });
        }
        assert_eq!(core.time(), TimeOfDay::new(0, 1, 15));
    }
    
    #[test]
    fn test_simultaneous_carry_and_minute_press_add() {
        let mut core = TimeCore::new(HourMode::TwentyFour);
        tick(&mut core, 59);
        core.step(CoreInputs { tick: true, inc_minutes: true, inc_hours: false });
        assert_eq!(core.time(), TimeOfDay::new(0, 2, 0));
    }
    
    #[test]
    fn test_double_carry_into_wrapped_minutes() {
        // 00:59:59 + tick + minute press: minutes 59 + 2 = 61 -> 01, one hour carry.
        let mut core = TimeCore::new(HourMode::TwentyFour);
        core.advance_seconds(59 * 60 + 59);
        core.step(CoreInputs { tick: true, inc_minutes: true, inc_hours: false });
        assert_eq!(core.time(), TimeOfDay::new(1, 1, 0));
    }
    
    #[test]
    fn test_all_events_at_day_boundary() {
        let mut core = TimeCore::new(HourMode::TwentyFour);
        core.advance_seconds(23 * 3600 + 59 * 60 + 59);
        core.step(CoreInputs { tick: true, inc_minutes: true, inc_hours: true });
        // hours: 23 + carry + press = 25 -> 1
        assert_eq!(core.time(), TimeOfDay::new(1, 1, 0));
    }
    
    #[test]
    fn test_advance_matches_ticks() {
        let mut stepped = TimeCore::new(HourMode::TwentyFour);
        let mut advanced = stepped.clone();
        tick(&mut stepped, 3725);
        advanced.advance_seconds(3725);
        assert_eq!(stepped, advanced);
        assert_eq!(advanced.time(), TimeOfDay::new(1, 2, 5));
    }
    
    #[test]
    fn test_parse_and_display() {
        let t: TimeOfDay = "07:05:09".parse().unwrap();
        assert_eq!(t, TimeOfDay::new(7, 5, 9));
        assert_eq!(t.to_string(), "07:05:09");
        
        assert!("7:5".parse::<TimeOfDay>().is_err());
        assert!("aa:00:00".parse::<TimeOfDay>().is_err());
        assert_eq!(
            "24:00:00".parse::<TimeOfDay>(),
            Err(ParseTimeError::OutOfRange { field: "hours", value: 24 })
        );
    }
    
    #[test]
    fn test_total_seconds_wraps() {
        let t = TimeOfDay::from_total_seconds(86_400 + 61, HourMode::TwentyFour);
        assert_eq!(t, TimeOfDay::new(0, 1, 1));
        assert_eq!(t.total_seconds(), 61);
    }
}
