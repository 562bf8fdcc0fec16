//! HT16K33 command encoding
//!
//! Every transaction starts with a command byte. The upper nibble selects
//! the register, the lower bits carry the payload.
//!
//! | Register | Byte   | Payload                                  |
//! |----------|--------|------------------------------------------|
//! | RAM      | `0x00` | 16 bytes of display data                 |
//! | SYSTEM   | `0x20` | bit 0: oscillator on                     |
//! | KEYS     | `0x40` | read 6 bytes of key data                 |
//! | INTFLAG  | `0x60` | read 1 byte, nonzero = interrupt pending |
//! | SETUP    | `0x80` | bit 0: display on, bits 2..1: blink      |
//! | ROWINT   | `0xA0` | bit 0: INT select, bit 1: active high    |
//! | DIMMING  | `0xE0` | bits 3..0: brightness                    |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Command bytes
pub mod cmd {
    /// Display RAM address pointer
    pub const RAM: u8 = 0x00;
    /// System setup (oscillator)
    pub const SYSTEM: u8 = 0x20;
    /// Key data address pointer
    pub const KEYS: u8 = 0x40;
    /// Interrupt flag address pointer
    pub const INTFLAG: u8 = 0x60;
    /// Display setup (on/off, blink)
    pub const SETUP: u8 = 0x80;
    /// ROW/INT pin set
    pub const ROWINT: u8 = 0xA0;
    /// Dimming set
    pub const DIMMING: u8 = 0xE0;

    /// Oscillator on bit for [`SYSTEM`]
    pub const OSCILLATOR_ON: u8 = 0x01;
    /// Display on bit for [`SETUP`]
    pub const DISPLAY_ON: u8 = 0x01;
    /// Display off for [`SETUP`]
    pub const DISPLAY_OFF: u8 = 0x00;
}

/// Base I2C address (A2..A0 all low)
pub const BASE_ADDRESS: u8 = 0x70;

/// Highest brightness level
pub const MAX_BRIGHTNESS: u8 = 0x0F;

/// Number of key data bytes (3 rows x 2 bytes)
pub const KEY_DATA_LEN: usize = 6;

/// 7-bit I2C address for the given address pin levels
///
/// The 28-pin package exposes A2..A0, the 24-pin package only A1..A0
/// (leave `a2` false), the 20-pin package none.
pub const fn address(a2: bool, a1: bool, a0: bool) -> u8 {
    BASE_ADDRESS | (a2 as u8) << 2 | (a1 as u8) << 1 | a0 as u8
}

/// Blink rate codes, already positioned in bits 2..1 of the SETUP payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum BlinkRate {
    /// Steady display
    #[default]
    Off = 0x00,
    /// Blink at 2 Hz
    Hz2 = 0x02,
    /// Blink at 1 Hz
    Hz1 = 0x04,
    /// Blink at 0.5 Hz
    HalfHz = 0x06,
}

impl BlinkRate {
    /// Raw SETUP payload bits
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<BlinkRate> for u8 {
    fn from(rate: BlinkRate) -> Self {
        rate.code()
    }
}

/// Function of the shared ROW15/INT pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RowIntMode {
    /// Pin drives a display row (power-on default)
    #[default]
    Row,
    /// Key-scan interrupt output, active low
    InterruptActiveLow,
    /// Key-scan interrupt output, active high
    InterruptActiveHigh,
}

impl RowIntMode {
    /// The `(use_as_interrupt, active_high)` pair for this mode
    pub const fn flags(self) -> (bool, bool) {
        match self {
            RowIntMode::Row => (false, false),
            RowIntMode::InterruptActiveLow => (true, false),
            RowIntMode::InterruptActiveHigh => (true, true),
        }
    }
}

/// SYSTEM command: oscillator on (awake) or off (standby)
pub const fn system(oscillator_on: bool) -> u8 {
    if oscillator_on {
        cmd::SYSTEM | cmd::OSCILLATOR_ON
    } else {
        cmd::SYSTEM & !cmd::OSCILLATOR_ON
    }
}

/// SETUP command with the display on and the given raw blink code
///
/// The code is not validated; pass one of the [`BlinkRate`] codes.
pub const fn setup(blink: u8) -> u8 {
    cmd::SETUP | cmd::DISPLAY_ON | blink
}

/// SETUP command with an explicit display on/off state and raw blink code
pub const fn display(on: bool, blink: u8) -> u8 {
    let on = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
    cmd::SETUP | on | blink
}

/// DIMMING command; `level` is truncated to 4 bits
pub const fn dimming(level: u8) -> u8 {
    cmd::DIMMING | (level & MAX_BRIGHTNESS)
}

/// ROWINT command
///
/// `active_high` only takes effect together with `use_as_interrupt`: the
/// two flags are ANDed before being placed in bit 1, matching the register
/// layout where polarity is meaningless in row mode.
pub const fn row_int(use_as_interrupt: bool, active_high: bool) -> u8 {
    cmd::ROWINT | ((active_high & use_as_interrupt) as u8) << 1 | use_as_interrupt as u8
}
