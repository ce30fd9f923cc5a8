//! Logger configuration: timing, cues, file name and pin assignments.
//!
//! The defaults describe the reference board (Raspberry Pi Pico with two
//! push buttons, a joystick push switch, an RGB LED, an SSD1306 panel and a
//! passive buzzer).

use crate::buzzer::Cue;
use crate::input::PinMap;

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const DEBOUNCE_MS: u32 = 200;
pub const SAMPLE_INTERVAL_MS: u32 = 100; // 10 samples per second
pub const IDLE_POLL_MS: u32 = 100;

// ---------------------------------------------------------------------------
// Buzzer cues
// ---------------------------------------------------------------------------
pub const START_CUE_HZ: u32 = 2_000;
pub const START_CUE_MS: u32 = 500;
pub const STOP_CUE_HZ: u32 = 150;
pub const STOP_CUE_MS: u32 = 300;

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------
pub const CSV_FILENAME: &str = "imu_data1.csv";

// ---------------------------------------------------------------------------
// GPIO (reference board)
// ---------------------------------------------------------------------------
pub const PIN_BUTTON_A: u8 = 5; // Record toggle
pub const PIN_BUTTON_B: u8 = 6; // Mount toggle
pub const PIN_JOYSTICK_SW: u8 = 22; // Mode switch (reboot to USB boot)

/// Runtime configuration for a [`Datalogger`](crate::Datalogger).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Quiescent interval a button must respect between accepted presses.
    pub debounce_ms: u32,

    /// Delay between two captured samples.
    pub sample_interval_ms: u32,

    /// Delay between two idle polls of the outer driver loop.
    pub idle_poll_ms: u32,

    /// Tone played when a recording session starts.
    pub start_cue: Cue,

    /// Tone played when a recording session ends.
    pub stop_cue: Cue,

    /// Name of the CSV file samples are appended to.
    pub filename: &'static str,

    /// Physical pin to logical button assignment.
    pub pins: PinMap,
}

impl LoggerConfig {
    /// Returns the reference board configuration.
    pub const fn new() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            sample_interval_ms: SAMPLE_INTERVAL_MS,
            idle_poll_ms: IDLE_POLL_MS,
            start_cue: Cue::new(START_CUE_HZ, START_CUE_MS),
            stop_cue: Cue::new(STOP_CUE_HZ, STOP_CUE_MS),
            filename: CSV_FILENAME,
            pins: PinMap::new(PIN_BUTTON_A, PIN_BUTTON_B, PIN_JOYSTICK_SW),
        }
    }

    /// Sets the debounce interval.
    pub const fn debounce_ms(mut self, ms: u32) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Sets the delay between captured samples.
    pub const fn sample_interval_ms(mut self, ms: u32) -> Self {
        self.sample_interval_ms = ms;
        self
    }

    /// Sets the delay between idle polls.
    pub const fn idle_poll_ms(mut self, ms: u32) -> Self {
        self.idle_poll_ms = ms;
        self
    }

    /// Sets the session start and stop cues.
    pub const fn cues(mut self, start: Cue, stop: Cue) -> Self {
        self.start_cue = start;
        self.stop_cue = stop;
        self
    }

    /// Sets the CSV file name.
    pub const fn filename(mut self, filename: &'static str) -> Self {
        self.filename = filename;
        self
    }

    /// Sets the pin map.
    pub const fn pins(mut self, pins: PinMap) -> Self {
        self.pins = pins;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new()
    }
}
