//! I2C bus abstractions
//!
//! Provides the trait for I2C master operations used by the driver, plus
//! an adapter for `embedded-hal` buses.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), BusError>;
}

impl<T: I2cBus + ?Sized> I2cBus for &mut T {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        T::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError> {
        T::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), BusError> {
        T::write_read(self, address, write_data, read_buf)
    }
}

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// Bus error (misplaced START/STOP)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// NACK received (address or data)
    Nack,
    /// Overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for BusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => BusError::Bus,
            ErrorKind::ArbitrationLoss => BusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(_) => BusError::Nack,
            ErrorKind::Overrun => BusError::Overrun,
            _ => BusError::Other,
        }
    }
}

impl BusError {
    /// Classify any `embedded-hal` I2C error
    pub fn from_i2c<E: embedded_hal::i2c::Error>(err: E) -> Self {
        err.kind().into()
    }
}

/// Adapter from an `embedded-hal` 1.0 blocking I2C bus to [`I2cBus`]
#[derive(Debug)]
pub struct EmbeddedHalBus<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> EmbeddedHalBus<I2C> {
    /// Wrap an `embedded-hal` bus
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give back the wrapped bus
    pub fn into_inner(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> I2cBus for EmbeddedHalBus<I2C> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        self.i2c.write(address, data).map_err(|e| e.kind().into())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.i2c.read(address, buf).map_err(|e| e.kind().into())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), BusError> {
        self.i2c
            .write_read(address, write_data, read_buf)
            .map_err(|e| e.kind().into())
    }
}
