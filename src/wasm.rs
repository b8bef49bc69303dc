//! WebAssembly bindings for the clock simulation.
//!
//! This module provides JavaScript-friendly wrappers around [`Clock`].

use wasm_bindgen::prelude::*;
use crate::{Button, ButtonInputs, Clock, ClockConfig};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WebAssembly-friendly clock wrapper.
#[wasm_bindgen]
pub struct WasmClock {
    clock: Clock,
    inputs: ButtonInputs,
}

#[wasm_bindgen]
impl WasmClock {
    /// Create a clock with the cheap simulation timing (600 Hz system clock).
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmClock, JsError> {
        Self::from_config(ClockConfig::simulation())
    }
    
    /// Create a clock from a JSON config.
    #[wasm_bindgen]
    pub fn with_config(json: &str) -> Result<WasmClock, JsError> {
        let config = ClockConfig::from_json(json)
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        Self::from_config(config)
    }
    
    /// Step one clock edge. Returns true if the timebase ticked.
    #[wasm_bindgen]
    pub fn step(&mut self) -> bool {
        self.clock.step(self.inputs).tick
    }
    
    /// Advance `cycles` clock edges.
    #[wasm_bindgen]
    pub fn fast_forward(&mut self, cycles: f64) {
        self.clock.fast_forward(cycles.max(0.0) as u64, self.inputs);
    }
    
    /// Advance `seconds` of simulated wall time.
    #[wasm_bindgen]
    pub fn advance_seconds(&mut self, seconds: u32) {
        self.clock.advance_seconds(seconds as u64, self.inputs);
    }
    
    /// Press and release a button ("minutes" or "hours"). Lines held with
    /// `set_button` stay at their level.
    #[wasm_bindgen]
    pub fn press(&mut self, button: &str) -> Result<u32, JsError> {
        let button: Button = button.parse()
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        Ok(self.clock.press_over(self.inputs, button, 4) as u32)
    }
    
    /// Drive a button line level directly.
    #[wasm_bindgen]
    pub fn set_button(&mut self, button: &str, level: bool) -> Result<(), JsError> {
        let button: Button = button.parse()
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        self.inputs.set(button, level);
        Ok(())
    }
    
    /// Assert reset.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.clock.reset();
        self.inputs = ButtonInputs::IDLE;
    }
    
    /// Time as `HH:MM:SS`.
    #[wasm_bindgen]
    pub fn time(&self) -> String {
        self.clock.time().to_string()
    }
    
    /// Display digits, seconds ones first.
    #[wasm_bindgen]
    pub fn digits(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.clock.digits()[..])
    }
    
    /// Active digit position.
    #[wasm_bindgen]
    pub fn active_digit(&self) -> u8 {
        self.clock.frame().index
    }
    
    /// Chip-select pad levels.
    #[wasm_bindgen]
    pub fn cs(&self) -> u8 {
        self.clock.frame().cs
    }
    
    /// Segment pad levels.
    #[wasm_bindgen]
    pub fn segments(&self) -> u8 {
        self.clock.frame().segments
    }
    
    /// Cycle count since reset.
    #[wasm_bindgen]
    pub fn cycles(&self) -> f64 {
        self.clock.cycles() as f64
    }
    
    /// Every register as a JSON string.
    #[wasm_bindgen]
    pub fn state_json(&self) -> Result<String, JsError> {
        self.clock.to_json()
            .map_err(|e| JsError::new(&format!("{}", e)))
    }
}

impl WasmClock {
    fn from_config(config: ClockConfig) -> Result<WasmClock, JsError> {
        let clock = Clock::new(config)
            .map_err(|e| JsError::new(&format!("{}", e)))?;
        Ok(Self {
            clock,
            inputs: ButtonInputs::IDLE,
        })
    }
}
