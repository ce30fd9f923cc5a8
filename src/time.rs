//! Time abstraction traits for platform-agnostic timing.
//!
//! The logger only ever needs "how long since", so instants expose a single
//! `duration_since`. Blocking waits are not part of these traits; they go
//! through [`embedded_hal::delay::DelayNs`].

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Milliseconds since boot, as read from a 32-bit free-running counter.
///
/// The counter wraps after roughly 49.7 days. `duration_since` uses wrapping
/// subtraction, so intervals shorter than one full wrap stay correct across
/// the rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

/// Duration counterpart of [`Millis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisDuration(pub u32);

impl TimeDuration for MillisDuration {
    const ZERO: Self = MillisDuration(0);

    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    fn from_millis(millis: u64) -> Self {
        MillisDuration(millis.min(u32::MAX as u64) as u32)
    }
}

impl TimeInstant for Millis {
    type Duration = MillisDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MillisDuration(self.0.wrapping_sub(earlier.0))
    }
}

impl From<u32> for Millis {
    fn from(ms: u32) -> Self {
        Millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_since_is_plain_difference() {
        assert_eq!(Millis(1_250).duration_since(Millis(1_000)), MillisDuration(250));
    }

    #[test]
    fn duration_since_survives_counter_wrap() {
        // 100 ms before the wrap to 100 ms after it
        let before = Millis(u32::MAX - 99);
        let after = Millis(100);
        assert_eq!(after.duration_since(before).as_millis(), 200);
    }

    #[test]
    fn from_millis_saturates() {
        assert_eq!(MillisDuration::from_millis(u64::MAX), MillisDuration(u32::MAX));
    }
}
