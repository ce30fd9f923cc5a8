//! FAT volume on an SPI SD card, exposed as datalogger `Storage`.
//!
//! The card has no long file name support: names must be 8.3.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;
use embedded_sdmmc::{
    Error, Mode, RawVolume, SdCard, SdCardError, TimeSource, Timestamp, VolumeIdx, VolumeManager,
};
use imu_datalogger::Storage;

/// Fixed timestamp; the board has no RTC.
pub struct NoClock;

impl TimeSource for NoClock {
    fn get_timestamp(&self) -> Timestamp {
        Timestamp {
            year_since_1970: 55,
            zero_indexed_month: 0,
            zero_indexed_day: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }
}

pub struct SdStorage<SPI: SpiDevice, DELAY: DelayNs> {
    volumes: VolumeManager<SdCard<SPI, DELAY>, NoClock>,
    volume: Option<RawVolume>,
}

impl<SPI: SpiDevice, DELAY: DelayNs> SdStorage<SPI, DELAY> {
    pub fn new(spi: SPI, delay: DELAY) -> Self {
        Self {
            volumes: VolumeManager::new(SdCard::new(spi, delay), NoClock),
            volume: None,
        }
    }

    fn volume(&self) -> Result<RawVolume, Error<SdCardError>> {
        self.volume.ok_or(Error::BadHandle)
    }
}

impl<SPI: SpiDevice, DELAY: DelayNs> Storage for SdStorage<SPI, DELAY> {
    type Error = Error<SdCardError>;

    fn mount(&mut self) -> Result<(), Self::Error> {
        if self.volume.is_none() {
            self.volume = Some(self.volumes.open_raw_volume(VolumeIdx(0))?);
        }
        Ok(())
    }

    fn unmount(&mut self) -> Result<(), Self::Error> {
        match self.volume.take() {
            Some(volume) => self.volumes.close_volume(volume),
            None => Ok(()),
        }
    }

    fn append(&mut self, filename: &str, text: &str) -> Result<(), Self::Error> {
        let dir = self.volumes.open_root_dir(self.volume()?)?;
        let result = self
            .volumes
            .open_file_in_dir(dir, filename, Mode::ReadWriteCreateOrAppend)
            .and_then(|file| {
                let written = self.volumes.write(file, text.as_bytes());
                self.volumes.close_file(file).and(written)
            });
        self.volumes.close_dir(dir)?;
        result
    }

    fn file_len(&mut self, filename: &str) -> Result<Option<u64>, Self::Error> {
        let dir = self.volumes.open_root_dir(self.volume()?)?;
        let result = match self.volumes.find_directory_entry(dir, filename) {
            Ok(entry) => Ok(Some(entry.size as u64)),
            Err(Error::NotFound) => Ok(None),
            Err(err) => Err(err),
        };
        self.volumes.close_dir(dir)?;
        result
    }
}
