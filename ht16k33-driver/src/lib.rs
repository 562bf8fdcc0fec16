//! HT16K33 protocol adapter
//!
//! Drives an HT16K33 over I2C:
//!
//! - [`Ht16k33`] - blocking driver over any [`I2cBus`]
//! - [`Ht16k33Async`] - async driver over an `embedded-hal-async` bus
//!
//! Both own a [`MatrixBuffer`]; drawing only changes the buffer, and
//! nothing reaches the chip until `write()` is called.
//!
//! ```ignore
//! let mut display = Ht16k33::new(EmbeddedHalBus::new(i2c), address(false, false, false));
//! display.init()?;
//! display.set_pixel(3, 2, 1);
//! display.flip_horizontal();
//! display.write()?;
//!
//! let keys = display.key_data()?; // clears the chip's key latches
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod asynch;
pub mod blocking;
pub mod power;

#[cfg(test)]
mod mock;

pub use asynch::Ht16k33Async;
pub use blocking::Ht16k33;
pub use power::PowerState;

pub use ht16k33_core::command::{address, BASE_ADDRESS};
pub use ht16k33_core::{
    BlinkRate, DisplayConfig, Key, KeyScan, MatrixBuffer, Orientation, RowIntMode, Sprite,
    Sprite16,
};
pub use ht16k33_hal::{BusError, EmbeddedHalBus, I2cBus};

/// Length of a display RAM write: command byte plus 16 data bytes
pub(crate) const RAM_FRAME_LEN: usize = 1 + ht16k33_core::matrix::RAM_BYTES;

/// Build the display RAM write for the buffer's current contents
///
/// Physical rows go out in ascending order; the orientation decides which
/// buffer row and byte order feed each slot.
pub(crate) fn ram_frame(buffer: &MatrixBuffer) -> [u8; RAM_FRAME_LEN] {
    let mut frame = [0u8; RAM_FRAME_LEN];
    frame[0] = ht16k33_core::command::cmd::RAM;
    frame[1..].copy_from_slice(&buffer.serialize());
    frame
}
