//! Sprites: fixed-height bitmaps used as a source for bulk writes

use super::ROWS;

/// Row-addressable bitmap of at most 8 rows
///
/// Rows are 16-bit words using the same bit-per-column layout as the
/// display buffer.
pub trait Sprite {
    /// Number of rows (at most 8)
    fn height(&self) -> usize;

    /// Row word at `row` (`row < height()`)
    fn row(&self, row: usize) -> u16;
}

/// Owned sprite of up to 8 rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sprite16 {
    rows: [u16; ROWS],
    height: u8,
}

impl Sprite16 {
    /// Build a sprite from row words
    ///
    /// Rows beyond the eighth are dropped.
    pub fn new(rows: &[u16]) -> Self {
        let height = rows.len().min(ROWS);
        let mut data = [0u16; ROWS];
        data[..height].copy_from_slice(&rows[..height]);
        Self {
            rows: data,
            height: height as u8,
        }
    }

    /// Full-height sprite from an 8-row array
    pub const fn from_array(rows: [u16; ROWS]) -> Self {
        Self {
            rows,
            height: ROWS as u8,
        }
    }

    /// Rows that make up the sprite
    pub fn rows(&self) -> &[u16] {
        &self.rows[..self.height as usize]
    }
}

impl Sprite for Sprite16 {
    fn height(&self) -> usize {
        self.height as usize
    }

    fn row(&self, row: usize) -> u16 {
        self.rows[row]
    }
}

impl Sprite for [u16] {
    fn height(&self) -> usize {
        self.len().min(ROWS)
    }

    fn row(&self, row: usize) -> u16 {
        self[row]
    }
}

impl<const N: usize> Sprite for [u16; N] {
    fn height(&self) -> usize {
        N.min(ROWS)
    }

    fn row(&self, row: usize) -> u16 {
        self[row]
    }
}
