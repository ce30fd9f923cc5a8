//! Shared test infrastructure for imu-datalogger integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::Cell;
use std::collections::{BTreeMap, VecDeque};
use std::string::String;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use imu_datalogger::config::{PIN_BUTTON_A, PIN_BUTTON_B, PIN_JOYSTICK_SW};
use imu_datalogger::display::STATUS_POS;
use imu_datalogger::{
    Board, Buzzer, Datalogger, EdgeEvent, EdgeSource, ImuSensor, LoggerConfig, Millis, RgbLed,
    Sample, StatusDisplay, StatusIndicator, Storage, TimeSource,
};
use palette::Srgb;

pub const RECORD: u8 = PIN_BUTTON_A;
pub const MOUNT: u8 = PIN_BUTTON_B;
pub const MODE: u8 = PIN_JOYSTICK_SW;

// ============================================================================
// Mock Time
// ============================================================================

/// Mock millisecond clock with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<Millis>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(Millis(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, ms: u32) {
        let current = self.current_time.get();
        self.current_time.set(Millis(current.0.wrapping_add(ms)));
    }

    pub fn set_time(&self, time: Millis) {
        self.current_time.set(time);
    }
}

impl TimeSource<Millis> for MockTimeSource {
    fn now(&self) -> Millis {
        self.current_time.get()
    }
}

/// Delay that moves the mock clock forward instead of blocking
pub struct MockDelay<'a> {
    clock: &'a MockTimeSource,
    leftover_ns: u32,
}

impl<'a> MockDelay<'a> {
    pub fn new(clock: &'a MockTimeSource) -> Self {
        Self {
            clock,
            leftover_ns: 0,
        }
    }
}

impl DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        let total = self.leftover_ns as u64 + ns as u64;
        self.clock.advance((total / 1_000_000) as u32);
        self.leftover_ns = (total % 1_000_000) as u32;
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.advance(us / 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance(ms);
    }
}

// ============================================================================
// Mock Edges
// ============================================================================

/// Edges scheduled in advance, released once the mock clock reaches them
pub struct ScriptedEdges<'a> {
    clock: &'a MockTimeSource,
    pending: VecDeque<EdgeEvent<Millis>>,
}

impl<'a> ScriptedEdges<'a> {
    pub fn new(clock: &'a MockTimeSource) -> Self {
        Self {
            clock,
            pending: VecDeque::new(),
        }
    }

    /// Schedules a falling edge on `pin` at `at_ms`. Calls must be in time order.
    pub fn press(mut self, pin: u8, at_ms: u32) -> Self {
        self.pending.push_back(EdgeEvent::new(pin, Millis(at_ms)));
        self
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl EdgeSource<Millis> for ScriptedEdges<'_> {
    fn next_edge(&mut self) -> Option<EdgeEvent<Millis>> {
        let now = self.clock.now();
        match self.pending.front() {
            Some(edge) if edge.at <= now => self.pending.pop_front(),
            _ => None,
        }
    }
}

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records all color changes for testing
pub struct MockLed {
    current_color: Srgb,
    color_history: Vec<Srgb>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            current_color: Srgb::new(0.0, 0.0, 0.0),
            color_history: Vec::new(),
        }
    }

    pub fn get_last_color(&self) -> Srgb {
        self.current_color
    }

    pub fn color_history(&self) -> &[Srgb] {
        &self.color_history
    }
}

impl RgbLed for MockLed {
    fn set_color(&mut self, color: Srgb) {
        self.current_color = color;
        self.color_history.push(color);
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// Mock display keeping the text of each row, keyed by the row's top edge
pub struct MockDisplay {
    rows: BTreeMap<i32, String>,
    flushes: usize,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            flushes: 0,
        }
    }

    pub fn row(&self, y: i32) -> Option<&str> {
        self.rows.get(&y).map(String::as_str)
    }

    pub fn status_text(&self) -> Option<&str> {
        self.row(STATUS_POS.1)
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl StatusDisplay for MockDisplay {
    fn clear(&mut self, _on: bool) {
        self.rows.clear();
    }

    fn clear_row(&mut self, y: i32) {
        self.rows.remove(&y);
    }

    fn draw_text(&mut self, text: &str, _x: i32, y: i32) {
        self.rows.entry(y).or_default().push_str(text);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

// ============================================================================
// Mock Storage
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    NotMounted,
    MountFailed,
    UnmountFailed,
}

/// In-memory filesystem with switchable mount/unmount failures
pub struct MockStorage {
    mounted: bool,
    files: BTreeMap<String, String>,
    pub fail_mount: bool,
    pub fail_unmount: bool,
    pub mount_calls: usize,
    pub unmount_calls: usize,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            mounted: false,
            files: BTreeMap::new(),
            fail_mount: false,
            fail_unmount: false,
            mount_calls: 0,
            unmount_calls: 0,
        }
    }

    /// Creates storage holding an existing file
    pub fn with_file(filename: &str, contents: &str) -> Self {
        let mut storage = Self::new();
        storage.files.insert(filename.into(), contents.into());
        storage
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn contents(&self, filename: &str) -> Option<&str> {
        self.files.get(filename).map(String::as_str)
    }
}

impl Storage for MockStorage {
    type Error = StorageError;

    fn mount(&mut self) -> Result<(), Self::Error> {
        self.mount_calls += 1;
        if self.fail_mount {
            return Err(StorageError::MountFailed);
        }
        self.mounted = true;
        Ok(())
    }

    fn unmount(&mut self) -> Result<(), Self::Error> {
        self.unmount_calls += 1;
        if self.fail_unmount {
            return Err(StorageError::UnmountFailed);
        }
        self.mounted = false;
        Ok(())
    }

    fn append(&mut self, filename: &str, text: &str) -> Result<(), Self::Error> {
        if !self.mounted {
            return Err(StorageError::NotMounted);
        }
        self.files.entry(filename.into()).or_default().push_str(text);
        Ok(())
    }

    fn file_len(&mut self, filename: &str) -> Result<Option<u64>, Self::Error> {
        if !self.mounted {
            return Err(StorageError::NotMounted);
        }
        Ok(self.files.get(filename).map(|f| f.len() as u64))
    }
}

// ============================================================================
// Mock Sensor
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorExhausted;

/// Sensor replaying a fixed list of samples
pub struct MockSensor {
    samples: VecDeque<Sample>,
    pub resets: usize,
    pub reads: usize,
}

impl MockSensor {
    pub fn new(samples: &[Sample]) -> Self {
        Self {
            samples: samples.iter().copied().collect(),
            resets: 0,
            reads: 0,
        }
    }

    /// Sensor yielding `count` distinct samples
    pub fn counting(count: i16) -> Self {
        let samples: Vec<Sample> = (1..=count)
            .map(|n| Sample::new([n, n, n], [-n, -n, -n]))
            .collect();
        Self::new(&samples)
    }
}

impl ImuSensor for MockSensor {
    type Error = SensorExhausted;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.resets += 1;
        Ok(())
    }

    fn read_raw(&mut self) -> Result<Sample, Self::Error> {
        self.reads += 1;
        self.samples.pop_front().ok_or(SensorExhausted)
    }
}

// ============================================================================
// Mock Buzzer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Play(u32),
    Stop,
}

/// Buzzer that records every play/stop call
pub struct MockBuzzer {
    pub tones: Vec<Tone>,
}

impl MockBuzzer {
    pub fn new() -> Self {
        Self { tones: Vec::new() }
    }
}

impl Buzzer for MockBuzzer {
    fn play(&mut self, frequency_hz: u32) {
        self.tones.push(Tone::Play(frequency_hz));
    }

    fn stop(&mut self) {
        self.tones.push(Tone::Stop);
    }
}

// ============================================================================
// Logger Assembly
// ============================================================================

pub type TestLogger<'a> = Datalogger<
    Millis,
    MockDelay<'a>,
    MockSensor,
    MockStorage,
    MockLed,
    MockDisplay,
    MockBuzzer,
>;

/// Builds a logger over mocks with the default configuration
pub fn logger<'a>(
    clock: &'a MockTimeSource,
    sensor: MockSensor,
    storage: MockStorage,
) -> TestLogger<'a> {
    let board = Board {
        sensor,
        storage,
        indicator: StatusIndicator::new(MockLed::new(), MockDisplay::new()),
        buzzer: MockBuzzer::new(),
    };
    Datalogger::new(board, MockDelay::new(clock), LoggerConfig::default())
}

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}
