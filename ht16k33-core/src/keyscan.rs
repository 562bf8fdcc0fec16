//! Key-scan data
//!
//! The chip scans a 13x3 key matrix. Key data RAM holds one 16-bit word per
//! key row, little-endian; only the low 13 bits carry keys. Reading the
//! key data clears the chip's key and interrupt latches, so a snapshot can
//! never be re-read from the device.

use heapless::Vec;

use crate::command::KEY_DATA_LEN;

/// Number of scanned key rows
pub const KEY_ROWS: usize = 3;

/// Number of key columns per row
pub const KEY_COLS: usize = 13;

/// Bits of a key row word that carry keys
pub const KEY_MASK: u16 = (1 << KEY_COLS) - 1;

/// A single key position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Key {
    /// Key row (0-2)
    pub row: u8,
    /// Key column (0-12)
    pub col: u8,
}

/// Pressed-key bitmasks from one key data read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyScan {
    rows: [u16; KEY_ROWS],
}

impl KeyScan {
    /// Snapshot from raw row words
    pub const fn new(rows: [u16; KEY_ROWS]) -> Self {
        Self { rows }
    }

    /// Decode the 6 key data bytes, low byte first for each row
    pub fn from_bytes(bytes: &[u8; KEY_DATA_LEN]) -> Self {
        let mut rows = [0u16; KEY_ROWS];
        for (row, pair) in rows.iter_mut().zip(bytes.chunks_exact(2)) {
            *row = u16::from_le_bytes([pair[0], pair[1]]);
        }
        Self { rows }
    }

    /// Row words exactly as read
    pub fn raw(&self) -> &[u16; KEY_ROWS] {
        &self.rows
    }

    /// Key bitmask for `row`, masked to 13 bits (0 for rows past 2)
    pub fn row(&self, row: usize) -> u16 {
        self.rows.get(row).map_or(0, |r| r & KEY_MASK)
    }

    /// Whether the key at (`row`, `col`) is pressed
    pub fn is_pressed(&self, row: usize, col: usize) -> bool {
        col < KEY_COLS && self.row(row) & (1 << col) != 0
    }

    /// Whether any key is pressed
    pub fn any_pressed(&self) -> bool {
        (0..KEY_ROWS).any(|row| self.row(row) != 0)
    }

    /// All pressed keys, row by row
    pub fn pressed(&self) -> Vec<Key, { KEY_ROWS * KEY_COLS }> {
        let mut keys = Vec::new();
        for row in 0..KEY_ROWS {
            let bits = self.row(row);
            for col in 0..KEY_COLS {
                if bits & (1 << col) != 0 {
                    // Capacity covers every key
                    let _ = keys.push(Key {
                        row: row as u8,
                        col: col as u8,
                    });
                }
            }
        }
        keys
    }
}
