//! Orientation flags and bit reversal

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Orientation applied when rows are serialized
///
/// The three flags are independent. Each toggle undoes itself when applied
/// twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orientation {
    /// Swap the two bytes of every transmitted row word
    pub reversed: bool,
    /// Physical row `n` is fed from buffer row `7 - n`
    pub v_flipped: bool,
    /// Reverse the bit order of every row word
    pub h_flipped: bool,
}

impl Orientation {
    /// Upright orientation with no flags set
    pub const fn new() -> Self {
        Self {
            reversed: false,
            v_flipped: false,
            h_flipped: false,
        }
    }

    /// Clear all flags
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Toggle byte order (useful when two 8x8 modules are wired backwards)
    pub fn reverse(&mut self) {
        self.reversed = !self.reversed;
    }

    /// Toggle vertical flip
    pub fn flip_vertical(&mut self) {
        self.v_flipped = !self.v_flipped;
    }

    /// Toggle horizontal flip
    pub fn flip_horizontal(&mut self) {
        self.h_flipped = !self.h_flipped;
    }
}

/// Reverse all 16 bits of a word (bit 0 <-> bit 15, bit 1 <-> bit 14, ...)
pub fn reverse_bits16(mut value: u16) -> u16 {
    let mut out = 0u16;
    for _ in 0..16 {
        out = (out << 1) | (value & 1);
        value >>= 1;
    }
    out
}
