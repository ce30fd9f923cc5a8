//! Mount/record flags and the logger state derived from them.

use core::sync::atomic::{AtomicBool, Ordering};

/// The state a logger is in, derived from its two flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoggerState {
    /// Card not mounted. Recording requests are remembered but have no effect.
    Idle,
    /// Card mounted, not recording.
    Mounted,
    /// Card mounted and recording requested. Samples are being captured.
    Recording,
}

/// The `mounted` and `recording` flags.
///
/// Both start cleared and are only changed through the toggle methods. A
/// [`Datalogger`](crate::Datalogger) owns its status and reads and toggles
/// it from the main context only. Toggles are a load followed by a store
/// (targets such as `thumbv6m` have no atomic read-modify-write), so a
/// status shared with other contexts must still have a single writer.
#[derive(Debug, Default)]
pub struct SystemStatus {
    mounted: AtomicBool,
    recording: AtomicBool,
}

impl SystemStatus {
    /// Creates a status with both flags cleared.
    pub const fn new() -> Self {
        Self {
            mounted: AtomicBool::new(false),
            recording: AtomicBool::new(false),
        }
    }

    /// Returns true if the card is considered mounted.
    pub fn mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Returns true if recording is requested.
    pub fn recording(&self) -> bool {
        self.recording.load(Ordering::SeqCst)
    }

    /// Returns true when capture may proceed.
    pub fn capturing(&self) -> bool {
        self.mounted() && self.recording()
    }

    /// Inverts `mounted` and returns the new value.
    pub fn toggle_mounted(&self) -> bool {
        let next = !self.mounted();
        self.mounted.store(next, Ordering::SeqCst);
        next
    }

    /// Inverts `recording` and returns the new value.
    pub fn toggle_recording(&self) -> bool {
        let next = !self.recording();
        self.recording.store(next, Ordering::SeqCst);
        next
    }

    /// Returns the derived logger state.
    pub fn state(&self) -> LoggerState {
        match (self.mounted(), self.recording()) {
            (false, _) => LoggerState::Idle,
            (true, false) => LoggerState::Mounted,
            (true, true) => LoggerState::Recording,
        }
    }
}
