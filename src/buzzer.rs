//! Audible cues.

use embedded_hal::delay::DelayNs;

/// Trait for abstracting a tone generator.
///
/// Implement this for your buzzer hardware (usually a PWM slice whose
/// period is set from the frequency). Handle hardware errors internally -
/// these methods cannot fail.
pub trait Buzzer {
    /// Starts a continuous tone at `frequency_hz`.
    fn play(&mut self, frequency_hz: u32);

    /// Silences the buzzer.
    fn stop(&mut self);
}

/// A tone held for a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cue {
    /// Tone frequency in hertz.
    pub frequency_hz: u32,

    /// How long the tone is held, in milliseconds.
    pub duration_ms: u32,
}

impl Cue {
    /// Creates a new cue.
    #[inline]
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    /// Plays the cue, blocking on `delay` for its duration.
    pub fn sound<B: Buzzer, W: DelayNs>(&self, buzzer: &mut B, delay: &mut W) {
        buzzer.play(self.frequency_hz);
        delay.delay_ms(self.duration_ms);
        buzzer.stop();
    }
}
