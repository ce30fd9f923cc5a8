//! Hardware timer wrapper for the datalogger time traits.

use imu_datalogger::{Millis, TimeSource};
use rp_pico::hal::Timer;

/// Millisecond clock over the RP2040 microsecond timer.
///
/// The 64-bit counter is truncated to 32 bits of milliseconds, which wraps
/// the same way the datalogger's `Millis` arithmetic expects.
#[derive(Clone, Copy)]
pub struct HardwareTimer {
    timer: Timer,
}

impl HardwareTimer {
    pub fn new(timer: Timer) -> Self {
        Self { timer }
    }
}

impl TimeSource<Millis> for HardwareTimer {
    fn now(&self) -> Millis {
        Millis((self.timer.get_counter().ticks() / 1_000) as u32)
    }
}
