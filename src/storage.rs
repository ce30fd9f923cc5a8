//! Storage abstraction for the SD card filesystem.

/// Trait for abstracting a mountable filesystem.
///
/// Implement this for your SD card stack. Each `append` must be complete
/// when it returns (open, write, close); the logger does not buffer lines
/// across calls.
pub trait Storage {
    /// Error reported by the filesystem or card.
    type Error: core::fmt::Debug;

    /// Mounts the filesystem.
    fn mount(&mut self) -> Result<(), Self::Error>;

    /// Unmounts the filesystem.
    fn unmount(&mut self) -> Result<(), Self::Error>;

    /// Appends `text` to `filename`, creating the file if needed.
    fn append(&mut self, filename: &str, text: &str) -> Result<(), Self::Error>;

    /// Returns the size of `filename` in bytes, or `None` if it does not exist.
    fn file_len(&mut self, filename: &str) -> Result<Option<u64>, Self::Error>;
}
