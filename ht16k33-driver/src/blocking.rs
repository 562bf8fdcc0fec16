//! Blocking HT16K33 driver
//!
//! Every bus-touching method is one blocking transaction. Nothing is
//! validated: out-of-range arguments are masked by the command encoders,
//! and the only failures are the ones the bus reports.

use ht16k33_core::command::{self, cmd, BlinkRate, KEY_DATA_LEN, MAX_BRIGHTNESS};
use ht16k33_core::matrix::{MatrixBuffer, Orientation, Sprite};
use ht16k33_core::{DisplayConfig, KeyScan};
use ht16k33_hal::{BusError, I2cBus};

use crate::power::PowerState;
use crate::ram_frame;

/// HT16K33 driver state
///
/// Owns the bus handle, the chip address, the pixel buffer with its
/// orientation, and the last known power state.
pub struct Ht16k33<B> {
    bus: B,
    address: u8,
    buffer: MatrixBuffer,
    power: PowerState,
    /// Last SETUP blink code sent, reused by `set_display`
    blink: u8,
}

impl<B: I2cBus> Ht16k33<B> {
    /// Create a driver for the chip at `address`
    ///
    /// No bus traffic happens until [`Ht16k33::init`].
    pub fn new(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            buffer: MatrixBuffer::new(),
            power: PowerState::Asleep,
            blink: BlinkRate::Off.code(),
        }
    }

    /// Create a driver using the address from `config`
    pub fn from_config(bus: B, config: &DisplayConfig) -> Self {
        Self::new(bus, config.address)
    }

    /// Bring the chip up
    ///
    /// Resets orientation, clears the buffer, wakes the oscillator, turns
    /// blinking off, sets full brightness and writes the (blank) buffer.
    pub fn init(&mut self) -> Result<(), BusError> {
        #[cfg(feature = "defmt")]
        defmt::debug!("HT16K33 init at {=u8:#x}", self.address);

        self.buffer.reset_orientation();
        self.buffer.clear();

        self.wake_up()?;
        self.set_blink(BlinkRate::Off)?;
        self.set_brightness(MAX_BRIGHTNESS)?;
        self.write()
    }

    /// Bring the chip up with the settings from `config`
    ///
    /// Runs [`Ht16k33::init`], then applies brightness, blink rate,
    /// ROW/INT mode and orientation, and writes the buffer again so the
    /// orientation takes effect. The address is the one given at
    /// construction.
    pub fn init_with(&mut self, config: &DisplayConfig) -> Result<(), BusError> {
        self.init()?;

        self.set_brightness(config.brightness)?;
        self.set_blink(config.blink)?;
        let (use_as_interrupt, active_high) = config.row_int.flags();
        self.set_row_int_pin(use_as_interrupt, active_high)?;
        self.buffer.set_orientation(config.orientation);
        self.write()
    }

    /// I2C address of the chip
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Last power state set through this driver
    pub fn power_state(&self) -> PowerState {
        self.power
    }

    /// Give back the bus
    pub fn release(self) -> B {
        self.bus
    }

    fn command(&mut self, byte: u8) -> Result<(), BusError> {
        self.bus.write(self.address, &[byte])
    }

    /// Start the oscillator (leave standby)
    ///
    /// Wait at least 1 ms before reading key data after waking.
    pub fn wake_up(&mut self) -> Result<(), BusError> {
        self.command(command::system(true))?;
        self.power = PowerState::Awake;

        #[cfg(feature = "defmt")]
        defmt::trace!("HT16K33 {=u8:#x} awake", self.address);
        Ok(())
    }

    /// Stop the oscillator (standby)
    ///
    /// Read pending key data first; the chip wakes on its own if a key is
    /// pressed during the scan window.
    pub fn sleep(&mut self) -> Result<(), BusError> {
        self.command(command::system(false))?;
        self.power = PowerState::Asleep;

        #[cfg(feature = "defmt")]
        defmt::trace!("HT16K33 {=u8:#x} asleep", self.address);
        Ok(())
    }

    /// Set brightness (0-15); higher values are truncated to 4 bits
    pub fn set_brightness(&mut self, level: u8) -> Result<(), BusError> {
        self.command(command::dimming(level))
    }

    /// Turn the display on with the given blink rate
    pub fn set_blink(&mut self, rate: BlinkRate) -> Result<(), BusError> {
        self.set_blink_raw(rate.code())
    }

    /// Turn the display on with a raw blink code, passed through unchecked
    pub fn set_blink_raw(&mut self, code: u8) -> Result<(), BusError> {
        self.command(command::setup(code))?;
        self.blink = code;
        Ok(())
    }

    /// Turn the display on or off, keeping the last blink rate
    pub fn set_display(&mut self, on: bool) -> Result<(), BusError> {
        self.command(command::display(on, self.blink))
    }

    /// Configure the shared ROW15/INT pin
    ///
    /// `active_high` is ANDed with `use_as_interrupt`, so polarity is only
    /// sent when the pin is switched to interrupt mode.
    pub fn set_row_int_pin(&mut self, use_as_interrupt: bool, active_high: bool) -> Result<(), BusError> {
        self.command(command::row_int(use_as_interrupt, active_high))
    }

    /// Send the whole buffer to display RAM
    ///
    /// This is the only point where buffer changes become visible.
    pub fn write(&mut self) -> Result<(), BusError> {
        let frame = ram_frame(&self.buffer);

        #[cfg(feature = "defmt")]
        defmt::trace!("HT16K33 {=u8:#x} RAM {=[u8]:#x}", self.address, &frame[1..]);

        self.bus.write(self.address, &frame)
    }

    /// Read all three key rows
    ///
    /// Reading clears the chip's key data and the interrupt flag (and
    /// releases the INT pin), so the result cannot be read again.
    pub fn key_data(&mut self) -> Result<KeyScan, BusError> {
        let mut raw = [0u8; KEY_DATA_LEN];
        self.bus.write_read(self.address, &[cmd::KEYS], &mut raw)?;

        let scan = KeyScan::from_bytes(&raw);
        #[cfg(feature = "defmt")]
        defmt::debug!("HT16K33 {=u8:#x} keys {}", self.address, scan);
        Ok(scan)
    }

    /// Check the key interrupt flag
    ///
    /// Not a pure read: treat it as a query that may touch latched state.
    pub fn key_interrupt(&mut self) -> Result<bool, BusError> {
        let mut flag = [0u8; 1];
        self.bus.write_read(self.address, &[cmd::INTFLAG], &mut flag)?;
        Ok(flag[0] != 0)
    }

    /// Pixel buffer
    pub fn matrix(&self) -> &MatrixBuffer {
        &self.buffer
    }

    /// Mutable pixel buffer
    pub fn matrix_mut(&mut self) -> &mut MatrixBuffer {
        &mut self.buffer
    }

    /// See [`MatrixBuffer::set_pixel`]
    pub fn set_pixel(&mut self, col: u8, row: u8, val: u8) {
        self.buffer.set_pixel(col, row, val);
    }

    /// See [`MatrixBuffer::set_row`]
    pub fn set_row(&mut self, row: u8, value: u16) {
        self.buffer.set_row(row, value);
    }

    /// See [`MatrixBuffer::set_column`]
    pub fn set_column(&mut self, col: u8, value: u8) {
        self.buffer.set_column(col, value);
    }

    /// Clear the buffer (the display keeps its image until the next write)
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// See [`MatrixBuffer::draw_sprite`]
    pub fn draw_sprite<S: Sprite + ?Sized>(&mut self, sprite: &S) {
        self.buffer.draw_sprite(sprite);
    }

    /// See [`MatrixBuffer::draw_sprite_at`]
    pub fn draw_sprite_at<S: Sprite + ?Sized>(&mut self, sprite: &S, col_offset: u8, row_offset: u8) {
        self.buffer.draw_sprite_at(sprite, col_offset, row_offset);
    }

    /// Current orientation
    pub fn orientation(&self) -> Orientation {
        self.buffer.orientation()
    }

    /// Clear all orientation flags
    pub fn reset_orientation(&mut self) {
        self.buffer.reset_orientation();
    }

    /// Toggle byte order (two 8x8 modules wired the wrong way round)
    pub fn reverse(&mut self) {
        self.buffer.reverse();
    }

    /// Toggle vertical flip
    pub fn flip_vertical(&mut self) {
        self.buffer.flip_vertical();
    }

    /// Toggle horizontal flip
    pub fn flip_horizontal(&mut self) {
        self.buffer.flip_horizontal();
    }
}
