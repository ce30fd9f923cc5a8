//! Inertial sensor abstraction and an MPU6050 register driver.

use crate::types::Sample;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Trait for abstracting the inertial sensor.
pub trait ImuSensor {
    /// Error reported by the sensor or its bus.
    type Error: core::fmt::Debug;

    /// Resets the sensor and wakes it up.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Reads one raw accelerometer/gyroscope/temperature sample.
    fn read_raw(&mut self) -> Result<Sample, Self::Error>;
}

/// Default I2C address (AD0 low).
pub const MPU6050_ADDR: u8 = 0x68;

const REG_ACCEL_XOUT_H: u8 = 0x3B;
const REG_TEMP_OUT_H: u8 = 0x41;
const REG_GYRO_XOUT_H: u8 = 0x43;
const REG_PWR_MGMT_1: u8 = 0x6B;

const PWR_MGMT_1_DEVICE_RESET: u8 = 0x80;
const PWR_MGMT_1_WAKE: u8 = 0x00;

const RESET_SETTLE_MS: u32 = 100;
const WAKE_SETTLE_MS: u32 = 10;

/// Errors from the MPU6050 driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mpu6050Error<E> {
    /// The I2C transaction failed.
    Bus(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for Mpu6050Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Mpu6050Error::Bus(err) => write!(f, "mpu6050 bus error: {:?}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for Mpu6050Error<E> {}

/// MPU6050 over I2C, read in its power-on ranges.
pub struct Mpu6050<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C: I2c, D: DelayNs> Mpu6050<I2C, D> {
    /// Creates a driver at the default address.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, MPU6050_ADDR)
    }

    /// Creates a driver at a custom address.
    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Releases the bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Mpu6050Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Mpu6050Error::Bus)
    }

    fn read_words<const N: usize>(
        &mut self,
        register: u8,
    ) -> Result<[i16; N], Mpu6050Error<I2C::Error>> {
        let mut raw = [0u8; 6];
        let bytes = &mut raw[..N * 2];
        self.i2c
            .write_read(self.address, &[register], bytes)
            .map_err(Mpu6050Error::Bus)?;

        let mut words = [0i16; N];
        for (word, pair) in words.iter_mut().zip(bytes.chunks_exact(2)) {
            *word = i16::from_be_bytes([pair[0], pair[1]]);
        }
        Ok(words)
    }
}

impl<I2C: I2c, D: DelayNs> ImuSensor for Mpu6050<I2C, D> {
    type Error = Mpu6050Error<I2C::Error>;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.write_register(REG_PWR_MGMT_1, PWR_MGMT_1_DEVICE_RESET)?;
        self.delay.delay_ms(RESET_SETTLE_MS);

        self.write_register(REG_PWR_MGMT_1, PWR_MGMT_1_WAKE)?;
        self.delay.delay_ms(WAKE_SETTLE_MS);
        Ok(())
    }

    fn read_raw(&mut self) -> Result<Sample, Self::Error> {
        let accel = self.read_words::<3>(REG_ACCEL_XOUT_H)?;
        let gyro = self.read_words::<3>(REG_GYRO_XOUT_H)?;
        let [temp] = self.read_words::<1>(REG_TEMP_OUT_H)?;

        Ok(Sample::new(accel, gyro).with_temp(temp))
    }
}
