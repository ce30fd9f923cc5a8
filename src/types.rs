//! Core data types shared across the logger.

/// One raw reading from the inertial sensor.
///
/// Values are the signed 16-bit register words as the sensor reports them,
/// with no scaling applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Acceleration x, y, z.
    pub accel: [i16; 3],

    /// Angular rate x, y, z.
    pub gyro: [i16; 3],

    /// Die temperature word. Not part of the CSV row.
    pub temp: i16,
}

impl Sample {
    /// Creates a sample from accelerometer and gyroscope triples.
    #[inline]
    pub const fn new(accel: [i16; 3], gyro: [i16; 3]) -> Self {
        Self {
            accel,
            gyro,
            temp: 0,
        }
    }

    /// Sets the temperature word.
    #[inline]
    pub const fn with_temp(mut self, temp: i16) -> Self {
        self.temp = temp;
        self
    }
}

/// An action the core cannot carry out itself and hands back to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Terminal {
    /// Reboot into the firmware-update (USB boot) mode.
    RebootToUpdate,
}

/// Outcome of one recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionReport {
    /// Number of CSV lines written during the session.
    pub samples: u32,

    /// Set when the mode-switch button was pressed while capturing.
    pub terminal: Option<Terminal>,
}

/// Errors returned by the CSV helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoggerError<E> {
    /// The storage backend reported a failure.
    Storage(E),

    /// A formatted line did not fit its fixed-capacity buffer.
    LineOverflow,
}

impl<E: core::fmt::Debug> core::fmt::Display for LoggerError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoggerError::Storage(err) => write!(f, "storage error: {:?}", err),
            LoggerError::LineOverflow => write!(f, "formatted line exceeds buffer capacity"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for LoggerError<E> {}

impl<E> From<E> for LoggerError<E> {
    fn from(err: E) -> Self {
        LoggerError::Storage(err)
    }
}
