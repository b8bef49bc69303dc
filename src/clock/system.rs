//! Top-level clock: all components wired to one clock domain.
//!
//! On every edge each component first produces its outputs from the
//! registers it holds, then every register updates at once. The core
//! therefore sees the tick and button pulses of the same cycle, and the
//! display shows the time the core held at the end of the previous cycle.

use crate::clock::button::EdgeDetector;
use crate::clock::core::{CoreInputs, TimeCore, TimeOfDay};
use crate::clock::display::{DisplayDriver, Frame, DIGITS};
use crate::clock::tick::TickGenerator;
use crate::config::{ClockConfig, ConfigError};
use crate::logic::bcd::to_bcd;
use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Cycles a [`Clock::press`] drives the released line afterwards so the
/// synchronizer settles.
const RELEASE_CYCLES: u64 = EdgeDetector::LATENCY + 1;

/// The two setting buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Minutes,
    Hours,
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Button::Minutes => write!(f, "minutes"),
            Button::Hours => write!(f, "hours"),
        }
    }
}

impl FromStr for Button {
    type Err = ParseButtonError;
    
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m" | "min" | "minute" | "minutes" => Ok(Button::Minutes),
            "h" | "hour" | "hours" => Ok(Button::Hours),
            _ => Err(ParseButtonError(s.to_string())),
        }
    }
}

/// Unknown button name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown button {0:?} (expected minutes or hours)")]
pub struct ParseButtonError(pub String);

/// Raw levels on the two button lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ButtonInputs {
    pub minutes: bool,
    pub hours: bool,
}

impl ButtonInputs {
    /// Both buttons released.
    pub const IDLE: ButtonInputs = ButtonInputs { minutes: false, hours: false };
    
    /// Only `button` held down.
    pub fn pressed(button: Button) -> Self {
        let mut inputs = Self::IDLE;
        inputs.set(button, true);
        inputs
    }
    
    pub fn get(&self, button: Button) -> bool {
        match button {
            Button::Minutes => self.minutes,
            Button::Hours => self.hours,
        }
    }
    
    pub fn set(&mut self, button: Button, level: bool) {
        match button {
            Button::Minutes => self.minutes = level,
            Button::Hours => self.hours = level,
        }
    }
}

/// Everything observable during one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outputs {
    /// Index of this cycle since reset.
    pub cycle: u64,
    /// Core registers during this cycle.
    pub time: TimeOfDay,
    /// Decimal digits, seconds ones first.
    pub digits: [u8; DIGITS],
    /// Display pads.
    pub frame: Frame,
    /// Timebase pulse.
    pub tick: bool,
    /// Minute button pulse.
    pub inc_minutes: bool,
    /// Hour button pulse.
    pub inc_hours: bool,
}

impl Outputs {
    /// Pulse from `button` during this cycle.
    pub fn pulse(&self, button: Button) -> bool {
        match button {
            Button::Minutes => self.inc_minutes,
            Button::Hours => self.inc_hours,
        }
    }
}

/// Split a time into display digits: seconds ones, seconds tens,
/// minutes ones, minutes tens, hours ones, hours tens.
pub fn display_digits(time: TimeOfDay) -> [u8; DIGITS] {
    let [s1, s10] = to_bcd(time.seconds).digits();
    let [m1, m10] = to_bcd(time.minutes).digits();
    let [h1, h10] = to_bcd(time.hours).digits();
    [s1, s10, m1, m10, h1, h10]
}

/// The complete clock.
#[derive(Debug, Clone, Serialize)]
pub struct Clock {
    config: ClockConfig,
    tick: TickGenerator,
    minutes_button: EdgeDetector,
    hours_button: EdgeDetector,
    core: TimeCore,
    display: DisplayDriver,
    /// Edges since reset.
    cycles: u64,
}

impl Clock {
    /// Elaborate a clock from validated constants.
    pub fn new(config: ClockConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            tick_period = config.tick_period(),
            digit_period = config.digit_period(),
            "elaborating clock"
        );
        
        Ok(Self {
            tick: TickGenerator::new(config.clock_hz, config.tick_hz),
            minutes_button: EdgeDetector::new(),
            hours_button: EdgeDetector::new(),
            core: TimeCore::new(config.hour_mode),
            display: DisplayDriver::new(
                config.clock_hz,
                config.refresh_hz,
                config.cs_polarity,
                config.segment_polarity,
            ),
            cycles: 0,
            config,
        })
    }
    
    pub fn config(&self) -> &ClockConfig {
        &self.config
    }
    
    /// Edges since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
    
    /// Current core registers.
    pub fn time(&self) -> TimeOfDay {
        self.core.time()
    }
    
    /// Current display digits.
    pub fn digits(&self) -> [u8; DIGITS] {
        display_digits(self.core.time())
    }
    
    /// Display pads for the current cycle.
    pub fn frame(&self) -> Frame {
        self.display.output(&self.digits())
    }
    
    pub fn tick_generator(&self) -> &TickGenerator {
        &self.tick
    }
    
    pub fn display(&self) -> &DisplayDriver {
        &self.display
    }
    
    /// One clock edge.
    pub fn step(&mut self, inputs: ButtonInputs) -> Outputs {
        // Combinational outputs from the current registers.
        let time = self.core.time();
        let digits = display_digits(time);
        let frame = self.display.output(&digits);
        
        // Register updates.
        let tick = self.tick.step();
        let inc_minutes = self.minutes_button.step(inputs.minutes);
        let inc_hours = self.hours_button.step(inputs.hours);
        if inc_minutes || inc_hours {
            debug!(cycle = self.cycles, inc_minutes, inc_hours, "button pulse");
        }
        self.core.step(CoreInputs { tick, inc_minutes, inc_hours });
        self.display.step();
        
        let cycle = self.cycles;
        self.cycles += 1;
        
        Outputs {
            cycle,
            time,
            digits,
            frame,
            tick,
            inc_minutes,
            inc_hours,
        }
    }
    
    /// Step `cycles` edges one at a time. Returns the number of ticks seen.
    pub fn run(&mut self, cycles: u64, inputs: ButtonInputs) -> u64 {
        (0..cycles).filter(|_| self.step(inputs).tick).count() as u64
    }
    
    /// Advance `cycles` edges with constant button levels.
    ///
    /// Steps individually until both synchronizers hold their input level,
    /// after which no button pulse can occur and the rest is computed in
    /// closed form. The result is identical to calling [`Clock::step`]
    /// `cycles` times, except that [`Clock::cycles`] saturates.
    pub fn fast_forward(&mut self, cycles: u64, inputs: ButtonInputs) {
        self.fast_forward_wide(u128::from(cycles), inputs);
    }
    
    /// Advance until `ticks` more timebase pulses have been applied.
    pub fn advance_ticks(&mut self, ticks: u64, inputs: ButtonInputs) {
        if ticks == 0 {
            return;
        }
        let period = u128::from(self.tick.period());
        let first = u128::from(self.tick.cycles_until_pulse()) + 1;
        self.fast_forward_wide(first + u128::from(ticks - 1) * period, inputs);
    }
    
    /// Advance by `seconds` of wall-clock time at the system clock rate.
    pub fn advance_seconds(&mut self, seconds: u64, inputs: ButtonInputs) {
        let cycles = u128::from(seconds) * u128::from(self.config.clock_hz);
        self.fast_forward_wide(cycles, inputs);
    }
    
    /// A clean press of `button` with idle buttons.
    pub fn press(&mut self, button: Button, hold_cycles: u64) -> u64 {
        self.press_over(ButtonInputs::IDLE, button, hold_cycles)
    }
    
    /// A clean press on top of `base` levels: drive `base` with `button`
    /// high for `hold_cycles` edges, then `base` again until the
    /// synchronizer settles. Lines already high in `base` stay high.
    /// Returns the number of pulses `button` produced.
    pub fn press_over(&mut self, base: ButtonInputs, button: Button, hold_cycles: u64) -> u64 {
        let mut held = base;
        held.set(button, true);
        let mut pulses = 0;
        for _ in 0..hold_cycles.max(1) {
            pulses += self.step(held).pulse(button) as u64;
        }
        for _ in 0..RELEASE_CYCLES {
            pulses += self.step(base).pulse(button) as u64;
        }
        pulses
    }
    
    /// Free-running display output with idle buttons. Never ends.
    pub fn frames(&mut self) -> Frames<'_> {
        Frames {
            clock: self,
            inputs: ButtonInputs::IDLE,
        }
    }
    
    /// Free-running display output with the given button levels.
    pub fn frames_with(&mut self, inputs: ButtonInputs) -> Frames<'_> {
        Frames { clock: self, inputs }
    }
    
    /// Asynchronous reset: every register back to zero.
    pub fn reset(&mut self) {
        self.tick.reset();
        self.minutes_button.reset();
        self.hours_button.reset();
        self.core.reset();
        self.display.reset();
        self.cycles = 0;
        debug!("clock reset");
    }
    
    /// Snapshot of every register as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
    
    /// Spans of up to `u64::MAX` ticks exceed a `u64` cycle count, so the
    /// closed form works in `u128`. The edge counter saturates.
    fn fast_forward_wide(&mut self, cycles: u128, inputs: ButtonInputs) {
        let mut remaining = cycles;
        while remaining > 0 && !self.buttons_settled(inputs) {
            self.step(inputs);
            remaining -= 1;
        }
        if remaining == 0 {
            return;
        }
        
        // Both dividers are periodic, so only the remainder moves them.
        let tick_period = u128::from(self.tick.period());
        let ticks = (u128::from(self.tick.counter()) + remaining) / tick_period;
        self.tick.skip((remaining % tick_period) as u64);
        let day = u128::from(self.core.mode().cycle_seconds());
        self.core.advance_seconds((ticks % day) as u64);
        
        let frame = u128::from(self.display.frame_cycles());
        self.display.skip((remaining % frame) as u64);
        
        let total = u128::from(self.cycles) + remaining;
        self.cycles = u64::try_from(total).unwrap_or(u64::MAX);
    }
    
    fn buttons_settled(&self, inputs: ButtonInputs) -> bool {
        self.minutes_button.is_settled(inputs.minutes)
            && self.hours_button.is_settled(inputs.hours)
    }
}

/// Lazy, unbounded sequence of display frames, one per clock edge.
pub struct Frames<'a> {
    clock: &'a mut Clock,
    inputs: ButtonInputs,
}

impl Iterator for Frames<'_> {
    type Item = Frame;
    
    fn next(&mut self) -> Option<Frame> {
        Some(self.clock.step(self.inputs).frame)
    }
    
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
