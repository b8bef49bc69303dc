//! Build-time constants for a clock instance.
//!
//! In hardware these are elaboration parameters. Here they are fixed once
//! a [`Clock`](crate::Clock) is created and can be stored as JSON.

use crate::clock::core::HourMode;
use crate::clock::display::DIGITS;
use crate::clock::tick::divider_period;
use crate::logic::segments::Polarity;
use serde::{Serialize, Deserialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Default system clock: 100 MHz.
pub const DEFAULT_CLOCK_HZ: u64 = 100_000_000;

/// Default full-display refresh rate.
pub const DEFAULT_REFRESH_HZ: u64 = 100;

/// Parameters a clock is elaborated with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClockConfig {
    /// System clock frequency.
    pub clock_hz: u64,
    /// Timebase rate; one tick advances the seconds counter.
    pub tick_hz: u64,
    /// Hour wraparound.
    pub hour_mode: HourMode,
    /// Full refreshes of all six digits per second.
    pub refresh_hz: u64,
    /// Chip-select pad polarity.
    pub cs_polarity: Polarity,
    /// Segment pad polarity.
    pub segment_polarity: Polarity,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            tick_hz: 1,
            hour_mode: HourMode::TwentyFour,
            refresh_hz: DEFAULT_REFRESH_HZ,
            cs_polarity: Polarity::ActiveLow,
            segment_polarity: Polarity::ActiveLow,
        }
    }
}

impl ClockConfig {
    /// A slow clock that is cheap to simulate cycle by cycle:
    /// 600 cycles per second, 10 cycles per digit.
    pub fn simulation() -> Self {
        Self {
            clock_hz: 600,
            refresh_hz: 10,
            ..Self::default()
        }
    }
    
    /// Check the constants describe a buildable clock.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("clock-hz", self.clock_hz),
            ("tick-hz", self.tick_hz),
            ("refresh-hz", self.refresh_hz),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroFrequency(field));
            }
        }
        
        if self.tick_hz > self.clock_hz {
            return Err(ConfigError::TickTooFast {
                clock_hz: self.clock_hz,
                tick_hz: self.tick_hz,
            });
        }
        
        if self.refresh_hz.saturating_mul(DIGITS as u64) > self.clock_hz {
            return Err(ConfigError::RefreshTooFast {
                clock_hz: self.clock_hz,
                refresh_hz: self.refresh_hz,
            });
        }
        
        Ok(())
    }
    
    /// Clock cycles between timebase ticks.
    pub fn tick_period(&self) -> u64 {
        divider_period(self.clock_hz, self.tick_hz)
    }
    
    /// Clock cycles each digit stays selected.
    pub fn digit_period(&self) -> u64 {
        divider_period(self.clock_hz, self.refresh_hz * DIGITS as u64)
    }
    
    /// Load and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_json(&text)?;
        debug!(path = %path.display(), ?config, "loaded clock config");
        Ok(config)
    }
    
    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
    
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Encode(e.to_string()))
    }
    
    /// Write the config as JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json()? + "\n")
            .map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Errors from building or loading a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be non-zero")]
    ZeroFrequency(&'static str),
    
    #[error("tick rate {tick_hz} Hz exceeds clock {clock_hz} Hz")]
    TickTooFast { clock_hz: u64, tick_hz: u64 },
    
    #[error("refresh rate {refresh_hz} Hz needs more than one digit per cycle at {clock_hz} Hz")]
    RefreshTooFast { clock_hz: u64, refresh_hz: u64 },
    
    #[error("I/O error: {0}")]
    Io(String),
    
    #[error("config parse error: {0}")]
    Parse(String),
    
    #[error("config encode error: {0}")]
    Encode(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_default_is_valid() {
        let config = ClockConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_period(), 100_000_000);
        assert_eq!(config.digit_period(), 166_667);
    }
    
    #[test]
    fn test_simulation_periods() {
        let config = ClockConfig::simulation();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_period(), 600);
        assert_eq!(config.digit_period(), 10);
    }
    
    #[test]
    fn test_rejects_zero() {
        let config = ClockConfig { tick_hz: 0, ..ClockConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrequency("tick-hz")));
    }
    
    #[test]
    fn test_rejects_fast_rates() {
        let config = ClockConfig { clock_hz: 10, tick_hz: 11, ..ClockConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::TickTooFast { .. })));
        
        let config = ClockConfig { clock_hz: 100, tick_hz: 1, refresh_hz: 17, ..ClockConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::RefreshTooFast { .. })));
    }
    
    #[test]
    fn test_json_partial_fields_use_defaults() {
        let config = ClockConfig::from_json(r#"{ "clock-hz": 1200, "hour-mode": "12" }"#).unwrap();
        assert_eq!(config.clock_hz, 1200);
        assert_eq!(config.hour_mode, HourMode::Twelve);
        assert_eq!(config.segment_polarity, Polarity::ActiveLow);
    }
    
    #[test]
    fn test_json_roundtrip() {
        let config = ClockConfig {
            cs_polarity: Polarity::ActiveHigh,
            ..ClockConfig::simulation()
        };
        let text = config.to_json().unwrap();
        assert!(text.contains(r#""cs-polarity": "#));
        assert_eq!(ClockConfig::from_json(&text), Ok(config));
    }
    
    #[test]
    fn test_json_errors() {
        assert!(matches!(ClockConfig::from_json("{"), Err(ConfigError::Parse(_))));
        assert!(matches!(
            ClockConfig::from_json(r#"{ "refresh-hz": 0 }"#),
            Err(ConfigError::ZeroFrequency("refresh-hz"))
        ));
    }
}
