//! Mount/record state machine and capture loop.
//!
//! Provides [`Datalogger`], which owns every collaborator of the logger and
//! turns button edges into mount, record and reboot actions. The main loop
//! calls [`Datalogger::poll`] (or hands control to [`Datalogger::run`]);
//! whenever the card is mounted and recording is requested, a recording
//! session captures samples into the CSV file until either flag is cleared.

use core::fmt::Write;

use crate::buzzer::Buzzer;
use crate::config::LoggerConfig;
use crate::csv;
use crate::display::StatusDisplay;
use crate::fmt::Dbg;
use crate::indicator::{RgbLed, Status, StatusIndicator};
use crate::input::{Button, Debouncer, EdgeEvent, EdgeSource};
use crate::sensor::ImuSensor;
use crate::status::{LoggerState, SystemStatus};
use crate::storage::Storage;
use crate::time::{TimeDuration, TimeInstant};
use crate::types::{SessionReport, Terminal};
use embedded_hal::delay::DelayNs;
use heapless::String;

const TITLE: &str = "Datalogger";
const TEXT_WAITING: &str = "Waiting...";
const TEXT_RECORDING: &str = "Recording...";
const TEXT_SAVED: &str = "Data saved!";
const TEXT_MOUNTED: &str = "SD mounted";
const TEXT_MOUNT_ERROR: &str = "SD mount error";

/// The hardware a [`Datalogger`] drives.
pub struct Board<S, F, L, D, Z>
where
    S: ImuSensor,
    F: Storage,
    L: RgbLed,
    D: StatusDisplay,
    Z: Buzzer,
{
    pub sensor: S,
    pub storage: F,
    pub indicator: StatusIndicator<L, D>,
    pub buzzer: Z,
}

/// Result of one [`Datalogger::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    /// Nothing to capture.
    Idle,
    /// A recording session ran to completion.
    Session(SessionReport),
    /// The board must carry out a terminal action.
    Terminal(Terminal),
}

/// IMU data logger.
///
/// # Type Parameters
/// * `I` - Time instant type carried by button edges
/// * `W` - Blocking delay implementation type
/// * `S` - Inertial sensor type
/// * `F` - Filesystem type
/// * `L` - Status LED type
/// * `D` - Status display type
/// * `Z` - Buzzer type
pub struct Datalogger<I, W, S, F, L, D, Z>
where
    I: TimeInstant,
    W: DelayNs,
    S: ImuSensor,
    F: Storage,
    L: RgbLed,
    D: StatusDisplay,
    Z: Buzzer,
{
    delay: W,
    board: Board<S, F, L, D, Z>,
    status: SystemStatus,
    debouncer: Debouncer<I>,
    config: LoggerConfig,
}

impl<I, W, S, F, L, D, Z> Datalogger<I, W, S, F, L, D, Z>
where
    I: TimeInstant,
    W: DelayNs,
    S: ImuSensor,
    F: Storage,
    L: RgbLed,
    D: StatusDisplay,
    Z: Buzzer,
{
    /// Creates a logger in the `Idle` state.
    pub fn new(board: Board<S, F, L, D, Z>, delay: W, config: LoggerConfig) -> Self {
        let interval = I::Duration::from_millis(config.debounce_ms as u64);

        Self {
            delay,
            board,
            status: SystemStatus::new(),
            debouncer: Debouncer::new(interval),
            config,
        }
    }

    /// Resets the sensor and draws the idle screen.
    ///
    /// Call once before the first [`poll`](Self::poll).
    pub fn start(&mut self) {
        if let Err(err) = self.board.sensor.reset() {
            error!("sensor reset failed: {:?}", Dbg(&err));
        }

        self.board.indicator.show_banner(TITLE);
        self.board.indicator.show_text(TEXT_WAITING);
        info!(
            "datalogger started: mounted={}, recording={}",
            self.status.mounted(),
            self.status.recording()
        );
    }

    /// Runs the logger until a terminal action is requested.
    ///
    /// Polls, then waits the idle interval, forever. The returned action is
    /// for the board to carry out (e.g. reset into USB boot).
    pub fn run<E: EdgeSource<I>>(&mut self, edges: &mut E) -> Terminal {
        self.start();

        loop {
            match self.poll(edges) {
                Poll::Terminal(terminal) => return terminal,
                Poll::Session(SessionReport {
                    terminal: Some(terminal),
                    ..
                }) => return terminal,
                Poll::Session(_) | Poll::Idle => {}
            }

            self.delay.delay_ms(self.config.idle_poll_ms);
        }
    }

    /// Handles pending edges, then runs a recording session if the card is
    /// mounted and recording is requested.
    pub fn poll<E: EdgeSource<I>>(&mut self, edges: &mut E) -> Poll {
        if let Some(terminal) = self.drain(edges) {
            return Poll::Terminal(terminal);
        }

        if self.status.capturing() {
            Poll::Session(self.run_session(edges))
        } else {
            Poll::Idle
        }
    }

    /// Handles every pending edge.
    ///
    /// Stops early and returns the action if a terminal action is requested.
    pub fn drain<E: EdgeSource<I>>(&mut self, edges: &mut E) -> Option<Terminal> {
        while let Some(edge) = edges.next_edge() {
            if let Some(terminal) = self.handle_edge(edge) {
                return Some(terminal);
            }
        }
        None
    }

    /// Decodes and debounces one raw edge, then acts on it.
    pub fn handle_edge(&mut self, edge: EdgeEvent<I>) -> Option<Terminal> {
        let Some(button) = self.config.pins.decode(edge.pin) else {
            debug!("edge on unmapped pin {}", edge.pin);
            return None;
        };

        if !self.debouncer.accept(button, edge.at) {
            trace!("bounce on {:?} ignored", button);
            return None;
        }

        self.handle_button(button)
    }

    /// Acts on an accepted button press.
    pub fn handle_button(&mut self, button: Button) -> Option<Terminal> {
        match button {
            Button::Record => {
                let recording = self.status.toggle_recording();
                self.board.indicator.set_status(Status::Busy);
                info!("recording requested: {}", recording);
                None
            }
            Button::Mount => {
                if self.status.toggle_mounted() {
                    self.mount();
                } else {
                    self.unmount();
                }
                None
            }
            Button::ModeSwitch => {
                info!("reboot to update mode requested");
                Some(Terminal::RebootToUpdate)
            }
        }
    }

    fn mount(&mut self) {
        self.board.indicator.set_status(Status::Initializing);

        match self.board.storage.mount() {
            Ok(()) => {
                info!("SD card mounted");
                self.board.indicator.show_text(TEXT_MOUNTED);
                self.board.indicator.set_status(Status::Ready);

                match csv::ensure_header(&mut self.board.storage, self.config.filename) {
                    Ok(true) => info!("CSV header written to {}", self.config.filename),
                    Ok(false) => {}
                    Err(err) => warn!("CSV header check failed: {:?}", Dbg(&err)),
                }
            }
            Err(err) => {
                error!("SD card mount failed: {:?}", Dbg(&err));
                self.board.indicator.show_text(TEXT_MOUNT_ERROR);
            }
        }
    }

    fn unmount(&mut self) {
        match self.board.storage.unmount() {
            Ok(()) => info!("SD card unmounted"),
            Err(err) => {
                error!("SD card unmount failed: {:?}", Dbg(&err));
                self.board.indicator.set_status(Status::Error);
            }
        }
    }

    /// Runs one recording session: start cue, capture, stop cue, summary.
    pub fn run_session<E: EdgeSource<I>>(&mut self, edges: &mut E) -> SessionReport {
        info!("recording session started");
        self.board.indicator.set_status(Status::Capturing);
        self.board.indicator.show_text(TEXT_RECORDING);
        self.config
            .start_cue
            .sound(&mut self.board.buzzer, &mut self.delay);

        let report = self.capture(edges);

        self.config
            .stop_cue
            .sound(&mut self.board.buzzer, &mut self.delay);
        self.board.indicator.set_status(Status::Ready);

        let mut count: String<20> = String::new();
        let _ = write!(count, "Samples: {}", report.samples);
        self.board.indicator.show_summary(TEXT_SAVED, &count);
        self.board.indicator.show_text(TEXT_WAITING);

        info!("recording session finished: {} samples", report.samples);
        report
    }

    /// Captures samples while the card is mounted and recording is requested.
    ///
    /// Pending edges are handled between samples, never in the middle of one.
    /// A sensor or storage failure skips that sample. A mode-switch press ends
    /// the capture and is reported in the returned [`SessionReport`].
    pub fn capture<E: EdgeSource<I>>(&mut self, edges: &mut E) -> SessionReport {
        let mut samples: u32 = 0;
        let mut terminal = None;

        loop {
            if let Some(action) = self.drain(edges) {
                terminal = Some(action);
                break;
            }
            if !self.status.capturing() {
                break;
            }

            match self.board.sensor.read_raw() {
                Ok(sample) => {
                    let written =
                        csv::write_sample(&mut self.board.storage, self.config.filename, &sample);
                    match written {
                        Ok(()) => {
                            samples += 1;
                            debug!("sample {}: {:?}", samples, sample);
                        }
                        Err(err) => warn!("append failed: {:?}", Dbg(&err)),
                    }
                }
                Err(err) => warn!("sensor read failed: {:?}", Dbg(&err)),
            }

            self.delay.delay_ms(self.config.sample_interval_ms);
        }

        info!("captured {} samples", samples);
        SessionReport { samples, terminal }
    }

    /// Returns the mount/record flags.
    pub fn status(&self) -> &SystemStatus {
        &self.status
    }

    /// Returns the derived logger state.
    pub fn state(&self) -> LoggerState {
        self.status.state()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Returns the board.
    pub fn board(&self) -> &Board<S, F, L, D, Z> {
        &self.board
    }

    /// Returns the board mutably.
    pub fn board_mut(&mut self) -> &mut Board<S, F, L, D, Z> {
        &mut self.board
    }

    /// Releases the board and delay.
    pub fn release(self) -> (Board<S, F, L, D, Z>, W) {
        (self.board, self.delay)
    }
}
