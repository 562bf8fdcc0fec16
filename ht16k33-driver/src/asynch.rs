//! Async HT16K33 driver
//!
//! Same protocol as [`crate::Ht16k33`], over an `embedded-hal-async` I2C
//! bus. Only the bus calls suspend; buffer operations are synchronous.

use embedded_hal_async::i2c::I2c;

use ht16k33_core::command::{self, cmd, BlinkRate, KEY_DATA_LEN, MAX_BRIGHTNESS};
use ht16k33_core::matrix::{MatrixBuffer, Orientation, Sprite};
use ht16k33_core::{DisplayConfig, KeyScan};
use ht16k33_hal::BusError;

use crate::power::PowerState;
use crate::ram_frame;

/// Async HT16K33 driver
pub struct Ht16k33Async<I2C> {
    i2c: I2C,
    address: u8,
    buffer: MatrixBuffer,
    power: PowerState,
    /// Last SETUP blink code sent, reused by `set_display`
    blink: u8,
}

impl<I2C> Ht16k33Async<I2C>
where
    I2C: I2c,
{
    /// Create a driver for the chip at `address`; no bus traffic yet
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            buffer: MatrixBuffer::new(),
            power: PowerState::Asleep,
            blink: BlinkRate::Off.code(),
        }
    }

    /// Initialize the display
    ///
    /// Resets orientation and buffer, wakes the chip, blink off, full
    /// brightness, then writes the blank buffer.
    pub async fn init(&mut self) -> Result<(), BusError> {
        #[cfg(feature = "defmt")]
        defmt::debug!("HT16K33 init at {=u8:#x}", self.address);

        self.buffer.reset_orientation();
        self.buffer.clear();

        self.wake_up().await?;
        self.set_blink(BlinkRate::Off).await?;
        self.set_brightness(MAX_BRIGHTNESS).await?;
        self.write().await
    }

    /// Initialize, then apply the settings from `config`
    pub async fn init_with(&mut self, config: &DisplayConfig) -> Result<(), BusError> {
        self.init().await?;

        self.set_brightness(config.brightness).await?;
        self.set_blink(config.blink).await?;
        let (use_as_interrupt, active_high) = config.row_int.flags();
        self.set_row_int_pin(use_as_interrupt, active_high).await?;
        self.buffer.set_orientation(config.orientation);
        self.write().await
    }

    /// Send a command to the chip
    async fn command(&mut self, byte: u8) -> Result<(), BusError> {
        self.i2c
            .write(self.address, &[byte])
            .await
            .map_err(BusError::from_i2c)
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
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Start the oscillator
    pub async fn wake_up(&mut self) -> Result<(), BusError> {
        self.command(command::system(true)).await?;
        self.power = PowerState::Awake;

        #[cfg(feature = "defmt")]
        defmt::trace!("HT16K33 {=u8:#x} awake", self.address);
        Ok(())
    }

    /// Stop the oscillator (standby)
    pub async fn sleep(&mut self) -> Result<(), BusError> {
        self.command(command::system(false)).await?;
        self.power = PowerState::Asleep;

        #[cfg(feature = "defmt")]
        defmt::trace!("HT16K33 {=u8:#x} asleep", self.address);
        Ok(())
    }

    /// Set brightness (0-15, truncated)
    pub async fn set_brightness(&mut self, level: u8) -> Result<(), BusError> {
        self.command(command::dimming(level)).await
    }

    /// Turn the display on with the given blink rate
    pub async fn set_blink(&mut self, rate: BlinkRate) -> Result<(), BusError> {
        self.set_blink_raw(rate.code()).await
    }

    /// Turn the display on with a raw blink code, passed through unchecked
    pub async fn set_blink_raw(&mut self, code: u8) -> Result<(), BusError> {
        self.command(command::setup(code)).await?;
        self.blink = code;
        Ok(())
    }

    /// Turn the display on or off, keeping the last blink rate
    pub async fn set_display(&mut self, on: bool) -> Result<(), BusError> {
        self.command(command::display(on, self.blink)).await
    }

    /// Configure the ROW15/INT pin; `active_high` needs `use_as_interrupt`
    pub async fn set_row_int_pin(&mut self, use_as_interrupt: bool, active_high: bool) -> Result<(), BusError> {
        self.command(command::row_int(use_as_interrupt, active_high))
            .await
    }

    /// Flush the buffer to display RAM
    pub async fn write(&mut self) -> Result<(), BusError> {
        let frame = ram_frame(&self.buffer);

        #[cfg(feature = "defmt")]
        defmt::trace!("HT16K33 {=u8:#x} RAM {=[u8]:#x}", self.address, &frame[1..]);

        self.i2c
            .write(self.address, &frame)
            .await
            .map_err(BusError::from_i2c)
    }

    /// Read all three key rows (clears the chip's key latches)
    pub async fn key_data(&mut self) -> Result<KeyScan, BusError> {
        let mut raw = [0u8; KEY_DATA_LEN];
        self.i2c
            .write_read(self.address, &[cmd::KEYS], &mut raw)
            .await
            .map_err(BusError::from_i2c)?;

        let scan = KeyScan::from_bytes(&raw);
        #[cfg(feature = "defmt")]
        defmt::debug!("HT16K33 {=u8:#x} keys {}", self.address, scan);
        Ok(scan)
    }

    /// Check the key interrupt flag
    pub async fn key_interrupt(&mut self) -> Result<bool, BusError> {
        let mut flag = [0u8; 1];
        self.i2c
            .write_read(self.address, &[cmd::INTFLAG], &mut flag)
            .await
            .map_err(BusError::from_i2c)?;
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

    /// Set or clear a pixel
    pub fn set_pixel(&mut self, col: u8, row: u8, val: u8) {
        self.buffer.set_pixel(col, row, val);
    }

    /// Replace a row word
    pub fn set_row(&mut self, row: u8, value: u16) {
        self.buffer.set_row(row, value);
    }

    /// Set a whole column
    pub fn set_column(&mut self, col: u8, value: u8) {
        self.buffer.set_column(col, value);
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// OR a sprite into the buffer at the origin
    pub fn draw_sprite<S: Sprite + ?Sized>(&mut self, sprite: &S) {
        self.buffer.draw_sprite(sprite);
    }

    /// OR a sprite into the buffer at an offset
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

    /// Toggle byte order
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
