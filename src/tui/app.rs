//! Front panel application state and logic.

use crate::{Button, ButtonInputs, Clock, Frame};
use crate::clock::display::DIGITS;
use std::time::{Duration, Instant};

/// Cycles a key press holds the button line.
const PRESS_CYCLES: u64 = 4;

/// Fastest simulation speed multiplier.
const MAX_SPEED: u64 = 100_000;

/// Front panel application state.
pub struct FrontPanelApp {
    /// The simulated clock.
    pub clock: Clock,
    /// Is simulated time advancing?
    pub running: bool,
    /// Simulated seconds per wall-clock second.
    pub speed: u64,
    /// Should we quit?
    pub should_quit: bool,
    /// Status message to display.
    pub status: String,
    /// Button presses accepted so far.
    pub presses: u64,
    /// Cycles owed from previous updates, in fractional form.
    carry_nanos: u128,
    last_update: Instant,
}

impl FrontPanelApp {
    /// Create a front panel around a freshly reset clock.
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            running: true,
            speed: 1,
            should_quit: false,
            status: "Running. Press 'm'/'h' to set, space to pause, 'q' to quit.".into(),
            presses: 0,
            carry_nanos: 0,
            last_update: Instant::now(),
        }
    }
    
    /// Advance the clock by the wall time elapsed since the last update.
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update);
        self.last_update = now;
        
        if self.running {
            self.advance(elapsed);
        }
    }
    
    /// Advance by `elapsed` of wall time, scaled by the speed setting.
    pub fn advance(&mut self, elapsed: Duration) {
        let clock_hz = self.clock.config().clock_hz as u128;
        let scaled = elapsed.as_nanos() * self.speed as u128 * clock_hz + self.carry_nanos;
        let cycles = scaled / 1_000_000_000;
        self.carry_nanos = scaled % 1_000_000_000;
        self.clock.fast_forward(cycles as u64, ButtonInputs::IDLE);
    }
    
    /// Press and release a setting button.
    pub fn press(&mut self, button: Button) {
        let pulses = self.clock.press(button, PRESS_CYCLES);
        self.presses += pulses;
        self.status = format!("Pressed {} -> {}", button, self.clock.time());
    }
    
    /// Pause or resume simulated time.
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
        self.status = if self.running { "Running.".into() } else { "Paused.".into() };
    }
    
    /// Run ten times faster.
    pub fn faster(&mut self) {
        self.speed = (self.speed * 10).min(MAX_SPEED);
        self.status = format!("Speed x{}", self.speed);
    }
    
    /// Run ten times slower.
    pub fn slower(&mut self) {
        self.speed = (self.speed / 10).max(1);
        self.status = format!("Speed x{}", self.speed);
    }
    
    /// Assert the reset line.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.carry_nanos = 0;
        self.presses = 0;
        self.status = "Reset.".into();
    }
    
    /// What each digit position shows while it is selected, most
    /// significant first (hours tens ... seconds ones).
    pub fn persisted_frames(&self) -> Vec<Frame> {
        let digits = self.clock.digits();
        (0..DIGITS as u8)
            .rev()
            .map(|i| self.clock.display().output_at(i, &digits))
            .collect()
    }
}

/// Run the front panel on a clock.
pub fn run_front_panel(clock: Clock) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    
    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    
    let mut app = FrontPanelApp::new(clock);
    
    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;
        
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') => app.should_quit = true,
                        KeyCode::Char('m') => app.press(Button::Minutes),
                        KeyCode::Char('h') => app.press(Button::Hours),
                        KeyCode::Char(' ') => app.toggle_running(),
                        KeyCode::Char('+') | KeyCode::Char('=') => app.faster(),
                        KeyCode::Char('-') => app.slower(),
                        KeyCode::Char('x') => app.reset(),
                        _ => {}
                    }
                }
            }
        }
        
        app.update();
        
        if app.should_quit {
            break;
        }
    }
    
    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClockConfig, TimeOfDay};
    
    fn app() -> FrontPanelApp {
        FrontPanelApp::new(Clock::new(ClockConfig::simulation()).unwrap())
    }
    
    #[test]
    fn test_advance_scales_with_speed() {
        let mut app = app();
        app.advance(Duration::from_secs(2));
        assert_eq!(app.clock.time(), TimeOfDay::new(0, 0, 2));
        
        app.faster();
        app.advance(Duration::from_secs(6));
        assert_eq!(app.clock.time(), TimeOfDay::new(0, 1, 2));
    }
    
    #[test]
    fn test_fractional_time_accumulates() {
        let mut app = app();
        for _ in 0..10 {
            app.advance(Duration::from_millis(100));
        }
        assert_eq!(app.clock.time(), TimeOfDay::new(0, 0, 1));
    }
    
    #[test]
    fn test_keys_drive_buttons() {
        let mut app = app();
        app.press(Button::Hours);
        app.press(Button::Minutes);
        assert_eq!(app.presses, 2);
        assert_eq!(app.clock.time(), TimeOfDay::new(1, 1, 0));
        
        app.reset();
        assert_eq!(app.clock.time(), TimeOfDay::MIDNIGHT);
    }
    
    #[test]
    fn test_speed_limits() {
        let mut app = app();
        app.slower();
        assert_eq!(app.speed, 1);
        for _ in 0..10 {
            app.faster();
        }
        assert_eq!(app.speed, MAX_SPEED);
    }
    
    #[test]
    fn test_persisted_frames_order() {
        let mut app = app();
        app.press(Button::Hours);
        let frames = app.persisted_frames();
        assert_eq!(frames.len(), DIGITS);
        assert_eq!(frames[0].index, 5);
        assert_eq!(frames[1].value, 1);
    }
}
