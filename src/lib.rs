#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Datalogger`**: Owns the hardware and runs the mount/record state machine
//! - **`Board`**: The sensor, storage, status indicator and buzzer a logger drives
//! - **`SystemStatus`**: The `mounted`/`recording` flags and the derived `LoggerState`
//! - **`Debouncer`**: Per-button quiescent-interval filter for raw edges
//! - **`EdgeSource`**: Trait for the queue interrupts push `EdgeEvent`s into;
//!   `EdgeQueue` is one that filters bounces as edges arrive
//! - **`ImuSensor`**, **`Storage`**, **`StatusDisplay`**, **`RgbLed`**, **`Buzzer`**:
//!   Traits to implement for your hardware
//! - **`TimeSource`**: Trait to implement for your timing system; stamps edges
//! - **`Terminal`**: Actions handed back to the board, such as rebooting into update mode
//!
//! Samples are written as CSV, one `ax,ay,az,gx,gy,gz` line each, under a
//! single header line.

#[macro_use]
mod fmt;

pub mod buzzer;
pub mod config;
pub mod csv;
pub mod display;
pub mod indicator;
pub mod input;
pub mod logger;
pub mod sensor;
pub mod status;
pub mod storage;
pub mod time;
pub mod types;

pub use buzzer::{Buzzer, Cue};
pub use config::LoggerConfig;
pub use display::{Flush, StatusDisplay, TextPanel};
pub use indicator::{IndicatorLines, RgbLed, Status, StatusColor, StatusIndicator};
pub use input::{
    Admission, Button, Debouncer, EdgeEvent, EdgeQueue, EdgeSource, NoEdges, PinMap,
};
pub use logger::{Board, Datalogger, Poll};
pub use sensor::{ImuSensor, Mpu6050, Mpu6050Error};
pub use status::{LoggerState, SystemStatus};
pub use storage::Storage;
pub use time::{Millis, MillisDuration, TimeDuration, TimeInstant, TimeSource};
pub use types::{LoggerError, Sample, SessionReport, Terminal};

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;
