//! Display configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::command::{BlinkRate, RowIntMode, BASE_ADDRESS, MAX_BRIGHTNESS};
use crate::matrix::Orientation;

/// Upper bound on the postcard encoding of [`DisplayConfig`]
pub const MAX_ENCODED_LEN: usize = 16;

/// Configuration (de)serialization errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output buffer too small or value not encodable
    Encode,
    /// Input bytes are not a valid configuration
    Decode,
}

/// Settings applied when a display is brought up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// 7-bit I2C address (0x70-0x77)
    pub address: u8,
    /// Brightness (0-15, higher values are truncated)
    pub brightness: u8,
    /// Blink rate
    pub blink: BlinkRate,
    /// ROW15/INT pin function
    pub row_int: RowIntMode,
    /// Orientation of the attached matrix
    pub orientation: Orientation,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new(BASE_ADDRESS)
    }
}

impl DisplayConfig {
    /// Defaults for a chip at `address`: full brightness, no blink, row
    /// mode, upright
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            brightness: MAX_BRIGHTNESS,
            blink: BlinkRate::Off,
            row_int: RowIntMode::Row,
            orientation: Orientation::new(),
        }
    }

    /// Same config with a different brightness
    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Same config with a different blink rate
    pub const fn with_blink(mut self, blink: BlinkRate) -> Self {
        self.blink = blink;
        self
    }

    /// Same config with a different ROW/INT pin mode
    pub const fn with_row_int(mut self, row_int: RowIntMode) -> Self {
        self.row_int = row_int;
        self
    }

    /// Same config with a different orientation
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Serialize into `buf`, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }

    /// Deserialize from bytes written by [`DisplayConfig::to_slice`]
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)
    }
}
