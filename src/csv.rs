//! CSV layout of the sample file.
//!
//! One header line, then one line per sample with six decimal integers:
//! `ax,ay,az,gx,gy,gz`.

use crate::storage::Storage;
use crate::types::{LoggerError, Sample};
use core::fmt::Write;
use heapless::String;

/// Header line written at the top of a new file.
pub const HEADER: &str = "ax,ay,az,gx,gy,gz\n";

/// Capacity of one formatted line: six `-32768`, five commas and a newline.
pub const LINE_CAPACITY: usize = 48;

/// A formatted CSV line.
pub type CsvLine = String<LINE_CAPACITY>;

/// Formats a sample as one CSV line, newline included.
pub fn format_line(sample: &Sample) -> Result<CsvLine, LoggerError<core::convert::Infallible>> {
    let [ax, ay, az] = sample.accel;
    let [gx, gy, gz] = sample.gyro;

    let mut line = CsvLine::new();
    writeln!(line, "{},{},{},{},{},{}", ax, ay, az, gx, gy, gz)
        .map_err(|_| LoggerError::LineOverflow)?;
    Ok(line)
}

/// Appends one sample line to `filename`.
pub fn write_sample<S: Storage>(
    storage: &mut S,
    filename: &str,
    sample: &Sample,
) -> Result<(), LoggerError<S::Error>> {
    let line = format_line(sample).map_err(|_| LoggerError::LineOverflow)?;
    storage.append(filename, &line)?;
    Ok(())
}

/// Writes the header if `filename` is missing or empty.
///
/// Returns `true` when the header was written. Calling it again on a file
/// that already has content does nothing.
pub fn ensure_header<S: Storage>(
    storage: &mut S,
    filename: &str,
) -> Result<bool, LoggerError<S::Error>> {
    match storage.file_len(filename)? {
        Some(len) if len > 0 => Ok(false),
        _ => {
            storage.append(filename, HEADER)?;
            Ok(true)
        }
    }
}
