//! Terminal front panel for the clock.
//!
//! Provides a live view of the simulated board:
//! - Six seven-segment digits decoded from the segment bus
//! - Chip-select and segment pad levels
//! - Minute/hour buttons, pause, speed and reset controls

mod app;
mod ui;

pub use app::{FrontPanelApp, run_front_panel};
