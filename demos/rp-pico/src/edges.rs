//! Button edges captured in `IO_IRQ_BANK0` and handed to the main loop.

use core::cell::RefCell;

use critical_section::Mutex;
use imu_datalogger::config::DEBOUNCE_MS;
use imu_datalogger::{
    Admission, EdgeEvent, EdgeQueue, EdgeSource, LoggerConfig, Millis, MillisDuration,
};

use crate::time::HardwareTimer;

/// Covers a main loop blocked for up to 1 s (mount, start cue) with all
/// three buttons pressed repeatedly.
const QUEUE_LEN: usize = 16;

static EDGES: Mutex<RefCell<EdgeQueue<Millis, QUEUE_LEN>>> =
    Mutex::new(RefCell::new(EdgeQueue::new(
        LoggerConfig::new().pins,
        MillisDuration(DEBOUNCE_MS),
    )));

/// Records a falling edge on `pin`. Call from interrupt context only.
pub fn record(pin: u8, clock: &HardwareTimer) -> Admission {
    critical_section::with(|cs| EDGES.borrow_ref_mut(cs).record(pin, clock))
}

/// Main-loop side of the edge queue.
pub struct IrqEdges;

impl EdgeSource<Millis> for IrqEdges {
    fn next_edge(&mut self) -> Option<EdgeEvent<Millis>> {
        critical_section::with(|cs| EDGES.borrow_ref_mut(cs).next_edge())
    }
}
