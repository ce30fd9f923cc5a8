//! Button input: pin decoding and per-button debouncing.
//!
//! Interrupt handlers should do as little as possible: capture the pin that
//! fired and the current instant as an [`EdgeEvent`] and push it somewhere
//! the main context can drain it from (an [`EdgeSource`]). Decoding and
//! debouncing happen in the main context.

use crate::time::{TimeDuration, TimeInstant, TimeSource};
use heapless::Deque;

/// Logical buttons of the logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Toggles recording.
    Record,

    /// Toggles the SD card mount.
    Mount,

    /// Requests a reboot into firmware-update mode.
    ModeSwitch,
}

impl Button {
    /// All buttons, in debounce slot order.
    pub const ALL: [Button; 3] = [Button::Record, Button::Mount, Button::ModeSwitch];

    const fn slot(self) -> usize {
        match self {
            Button::Record => 0,
            Button::Mount => 1,
            Button::ModeSwitch => 2,
        }
    }
}

/// Assignment of physical pin numbers to logical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    pub record: u8,
    pub mount: u8,
    pub mode_switch: u8,
}

impl PinMap {
    /// Creates a pin map.
    pub const fn new(record: u8, mount: u8, mode_switch: u8) -> Self {
        Self {
            record,
            mount,
            mode_switch,
        }
    }

    /// Decodes a pin number into the button wired to it.
    pub fn decode(&self, pin: u8) -> Option<Button> {
        if pin == self.record {
            Some(Button::Record)
        } else if pin == self.mount {
            Some(Button::Mount)
        } else if pin == self.mode_switch {
            Some(Button::ModeSwitch)
        } else {
            None
        }
    }

    /// Returns the pin a button is wired to.
    pub fn pin(&self, button: Button) -> u8 {
        match button {
            Button::Record => self.record,
            Button::Mount => self.mount,
            Button::ModeSwitch => self.mode_switch,
        }
    }
}

/// A raw falling edge seen on a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeEvent<I> {
    /// Pin number that fired.
    pub pin: u8,

    /// When it fired.
    pub at: I,
}

impl<I> EdgeEvent<I> {
    /// Creates an edge event.
    #[inline]
    pub const fn new(pin: u8, at: I) -> Self {
        Self { pin, at }
    }
}

/// A queue of pending edges, drained by the main context.
pub trait EdgeSource<I> {
    /// Takes the oldest pending edge, if any.
    fn next_edge(&mut self) -> Option<EdgeEvent<I>>;
}

impl<I, S: EdgeSource<I> + ?Sized> EdgeSource<I> for &mut S {
    fn next_edge(&mut self) -> Option<EdgeEvent<I>> {
        (**self).next_edge()
    }
}

/// An edge source that never yields anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEdges;

impl<I> EdgeSource<I> for NoEdges {
    fn next_edge(&mut self) -> Option<EdgeEvent<I>> {
        None
    }
}

/// Per-button quiescent-interval filter.
///
/// An event is accepted when no earlier event was accepted on the same
/// button, or when at least `interval` has elapsed since the last accepted
/// one. Rejected events leave the filter untouched.
#[derive(Debug, Clone)]
pub struct Debouncer<I: TimeInstant> {
    interval: I::Duration,
    last: [Option<I>; 3],
}

impl<I: TimeInstant> Debouncer<I> {
    /// Creates a debouncer with the given quiescent interval.
    pub const fn new(interval: I::Duration) -> Self {
        Self {
            interval,
            last: [None; 3],
        }
    }

    /// Decides whether an event on `button` at `now` counts as a press.
    pub fn accept(&mut self, button: Button, now: I) -> bool {
        let slot = &mut self.last[button.slot()];

        if let Some(last) = *slot {
            if now.duration_since(last).as_millis() < self.interval.as_millis() {
                return false;
            }
        }

        *slot = Some(now);
        true
    }

    /// Returns the last accepted instant for `button`.
    pub fn last_accepted(&self, button: Button) -> Option<I> {
        self.last[button.slot()]
    }

    /// Returns the quiescent interval.
    pub fn interval(&self) -> I::Duration {
        self.interval
    }
}

/// Outcome of [`EdgeQueue::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Admission {
    /// The edge was queued.
    Queued,
    /// The edge is a bounce or comes from an unmapped pin.
    Filtered,
    /// The queue is full; the edge was dropped.
    Full,
}

/// Fixed-capacity edge queue that filters bounces on the way in.
///
/// Only edges the logger's own [`Debouncer`] would accept are stored, so a
/// bouncing contact holds at most one slot per button per interval. With
/// three buttons, `N` must cover `3 * (longest main-loop block / interval + 1)`
/// edges for no press to be lost.
///
/// Put it in a `critical_section::Mutex` to share it between the GPIO
/// interrupt (which pushes) and the main loop (which drains).
pub struct EdgeQueue<I: TimeInstant, const N: usize> {
    edges: Deque<EdgeEvent<I>, N>,
    pins: PinMap,
    debouncer: Debouncer<I>,
}

impl<I: TimeInstant + core::fmt::Debug, const N: usize> core::fmt::Debug for EdgeQueue<I, N>
where
    I::Duration: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EdgeQueue")
            .field("edges", &self.edges)
            .field("pins", &self.pins)
            .field("debouncer", &self.debouncer)
            .finish()
    }
}

impl<I: TimeInstant, const N: usize> EdgeQueue<I, N> {
    /// Creates an empty queue filtering with the given pin map and interval.
    pub const fn new(pins: PinMap, interval: I::Duration) -> Self {
        Self {
            edges: Deque::new(),
            pins,
            debouncer: Debouncer::new(interval),
        }
    }

    /// Queues `edge` unless it is a bounce, comes from an unmapped pin or
    /// the queue is full.
    pub fn push(&mut self, edge: EdgeEvent<I>) -> Admission {
        let Some(button) = self.pins.decode(edge.pin) else {
            return Admission::Filtered;
        };
        if self.edges.is_full() {
            return Admission::Full;
        }
        if !self.debouncer.accept(button, edge.at) {
            return Admission::Filtered;
        }

        match self.edges.push_back(edge) {
            Ok(()) => Admission::Queued,
            Err(_) => Admission::Full,
        }
    }

    /// Stamps an edge on `pin` with the current time of `clock` and pushes it.
    pub fn record<T: TimeSource<I>>(&mut self, pin: u8, clock: &T) -> Admission {
        self.push(EdgeEvent::new(pin, clock.now()))
    }

    /// Returns the number of queued edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if no edge is queued.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<I: TimeInstant, const N: usize> EdgeSource<I> for EdgeQueue<I, N> {
    fn next_edge(&mut self) -> Option<EdgeEvent<I>> {
        self.edges.pop_front()
    }
}
