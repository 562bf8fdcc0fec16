//! Pixel buffer with orientation-aware serialization

use super::orientation::{reverse_bits16, Orientation};
use super::sprite::Sprite;
use super::{COL_MASK, RAM_BYTES, ROWS, ROW_MASK};

/// In-memory image of the display: 8 rows of 16 columns
///
/// All writers mask their coordinates, so no operation on the buffer can
/// fail or index out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixBuffer {
    rows: [u16; ROWS],
    orientation: Orientation,
}

impl MatrixBuffer {
    /// Create a zero-filled buffer with upright orientation
    pub const fn new() -> Self {
        Self {
            rows: [0; ROWS],
            orientation: Orientation::new(),
        }
    }

    /// Set or clear the pixel at (`col`, `row`)
    ///
    /// `col` wraps at 16, `row` wraps at 8, only bit 0 of `val` counts.
    pub fn set_pixel(&mut self, col: u8, row: u8, val: u8) {
        let col = col & COL_MASK;
        let row = (row & ROW_MASK) as usize;

        if val & 0x01 == 1 {
            self.rows[row] |= 1 << col;
        } else {
            self.rows[row] &= !(1 << col);
        }
    }

    /// Read the pixel at (`col`, `row`), with the same wrapping as `set_pixel`
    pub fn pixel(&self, col: u8, row: u8) -> bool {
        let col = col & COL_MASK;
        self.rows[(row & ROW_MASK) as usize] & (1 << col) != 0
    }

    /// Replace an entire row word
    pub fn set_row(&mut self, row: u8, value: u16) {
        self.rows[(row & ROW_MASK) as usize] = value;
    }

    /// Row word at `row` (wraps at 8)
    pub fn row(&self, row: u8) -> u16 {
        self.rows[(row & ROW_MASK) as usize]
    }

    /// All row words, in buffer order
    pub fn rows(&self) -> &[u16; ROWS] {
        &self.rows
    }

    /// Set a whole column: bit `r` of `value` lands in row `r`
    pub fn set_column(&mut self, col: u8, value: u8) {
        for row in 0..ROWS as u8 {
            self.set_pixel(col, row, (value >> row) & 0x01);
        }
    }

    /// Zero every row
    ///
    /// Orientation is untouched, and nothing changes on the display until
    /// the buffer is written out again.
    pub fn clear(&mut self) {
        self.rows = [0; ROWS];
    }

    /// OR a sprite into the buffer at the origin
    pub fn draw_sprite<S: Sprite + ?Sized>(&mut self, sprite: &S) {
        self.draw_sprite_at(sprite, 0, 0);
    }

    /// OR a sprite into the buffer, shifted right by `col_offset` bits and
    /// down by `row_offset` rows
    ///
    /// Columns pushed past bit 15 are dropped, rows wrap at 8. Lit pixels
    /// already in the buffer stay lit; clear first for a clean draw.
    pub fn draw_sprite_at<S: Sprite + ?Sized>(&mut self, sprite: &S, col_offset: u8, row_offset: u8) {
        for r in 0..sprite.height().min(ROWS) {
            let shifted = u32::from(sprite.row(r))
                .checked_shl(u32::from(col_offset))
                .unwrap_or(0);
            let target = (r + row_offset as usize) & ROW_MASK as usize;
            self.rows[target] |= (shifted & 0xFFFF) as u16;
        }
    }

    /// Current orientation
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Replace the orientation
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Clear all orientation flags
    pub fn reset_orientation(&mut self) {
        self.orientation.reset();
    }

    /// Toggle byte order of transmitted rows
    pub fn reverse(&mut self) {
        self.orientation.reverse();
    }

    /// Toggle row index reversal
    pub fn flip_vertical(&mut self) {
        self.orientation.flip_vertical();
    }

    /// Toggle bit order within rows
    pub fn flip_horizontal(&mut self) {
        self.orientation.flip_horizontal();
    }

    /// Bytes sent for physical row `row`
    ///
    /// Pipeline, in this order:
    /// 1. vertical flip picks buffer row `7 - row`
    /// 2. horizontal flip reverses the 16 bits of the word
    /// 3. low byte first, or high byte first when reversed
    pub fn serialize_row(&self, row: u8) -> [u8; 2] {
        let mut row = row & ROW_MASK;
        if self.orientation.v_flipped {
            row = ROW_MASK - row;
        }

        let mut out = self.rows[row as usize];
        if self.orientation.h_flipped {
            out = reverse_bits16(out);
        }

        let [lo, hi] = out.to_le_bytes();
        if self.orientation.reversed {
            [hi, lo]
        } else {
            [lo, hi]
        }
    }

    /// Full display RAM image, physical rows 0 through 7
    pub fn serialize(&self) -> [u8; RAM_BYTES] {
        let mut out = [0u8; RAM_BYTES];
        for (row, chunk) in out.chunks_exact_mut(2).enumerate() {
            chunk.copy_from_slice(&self.serialize_row(row as u8));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Sprite16;
    use proptest::prelude::*;

    #[test]
    fn test_new_is_blank() {
        let buffer = MatrixBuffer::new();
        assert_eq!(buffer.rows(), &[0; ROWS]);
        assert_eq!(buffer.orientation(), Orientation::default());
        assert_eq!(buffer.serialize(), [0; RAM_BYTES]);
    }

    #[test]
    fn test_set_pixel_masks_coordinates() {
        let mut buffer = MatrixBuffer::new();

        // col 17 -> 1, row 9 -> 1, val 3 -> 1
        buffer.set_pixel(17, 9, 3);
        assert_eq!(buffer.row(1), 0b10);
        assert!(buffer.pixel(1, 1));

        // val 2 has bit 0 clear, so this clears
        buffer.set_pixel(1, 1, 2);
        assert_eq!(buffer.row(1), 0);
    }

    #[test]
    fn test_set_row_wraps() {
        let mut buffer = MatrixBuffer::new();
        buffer.set_row(11, 0xBEEF);
        assert_eq!(buffer.row(3), 0xBEEF);
    }

    #[test]
    fn test_set_column() {
        let mut buffer = MatrixBuffer::new();
        buffer.set_row(2, 0xFFFF);

        buffer.set_column(4, 0b1000_0001);
        assert!(buffer.pixel(4, 0));
        assert!(buffer.pixel(4, 7));
        // Row 2 had every pixel lit; bit 2 of value is clear, so column 4 goes dark
        assert_eq!(buffer.row(2), 0xFFFF & !(1 << 4));
        for row in 1..7 {
            assert!(!buffer.pixel(4, row));
        }
    }

    #[test]
    fn test_clear_keeps_orientation() {
        let mut buffer = MatrixBuffer::new();
        buffer.set_row(0, 0x1234);
        buffer.flip_vertical();
        buffer.clear();
        assert_eq!(buffer.rows(), &[0; ROWS]);
        assert!(buffer.orientation().v_flipped);
    }

    #[test]
    fn test_draw_sprite_is_additive() {
        let mut buffer = MatrixBuffer::new();
        buffer.set_row(0, 0x0001);

        buffer.draw_sprite(&Sprite16::new(&[0x0100, 0x0002]));
        assert_eq!(buffer.row(0), 0x0101);
        assert_eq!(buffer.row(1), 0x0002);
    }

    #[test]
    fn test_draw_sprite_offsets() {
        let mut buffer = MatrixBuffer::new();
        let sprite = Sprite16::new(&[0xC001, 0x0003]);

        buffer.draw_sprite_at(&sprite, 4, 7);
        // Row 0 of the sprite lands on row 7, top bits shifted out
        assert_eq!(buffer.row(7), 0x0010);
        // Row 1 wraps to row 0
        assert_eq!(buffer.row(0), 0x0030);
    }

    #[test]
    fn test_draw_sprite_large_shift_drops_everything() {
        let mut buffer = MatrixBuffer::new();
        buffer.draw_sprite_at(&[0xFFFFu16; 8], 16, 0);
        buffer.draw_sprite_at(&[0xFFFFu16; 8], 200, 0);
        assert_eq!(buffer.rows(), &[0; ROWS]);
    }

    #[test]
    fn test_serialize_row_example() {
        let mut buffer = MatrixBuffer::new();
        buffer.set_row(3, 0b0000_0000_0000_0101);

        assert_eq!(buffer.serialize_row(3), [0x05, 0x00]);

        buffer.reverse();
        assert_eq!(buffer.serialize_row(3), [0x00, 0x05]);
        buffer.reverse();

        buffer.flip_horizontal();
        assert_eq!(buffer.serialize_row(3), [0x00, 0xA0]);
    }

    #[test]
    fn test_vertical_flip_remaps_rows() {
        let mut buffer = MatrixBuffer::new();
        buffer.set_row(0, 0x00AA);
        buffer.flip_vertical();

        let ram = buffer.serialize();
        assert_eq!(&ram[14..16], &[0xAA, 0x00]);
        assert_eq!(&ram[0..2], &[0x00, 0x00]);
    }

    #[test]
    fn test_all_flags_compose() {
        let mut buffer = MatrixBuffer::new();
        buffer.set_row(6, 0x0003);
        buffer.flip_vertical();
        buffer.flip_horizontal();
        buffer.reverse();

        // physical row 1 <- buffer row 6, 0x0003 -> 0xC000, high byte first
        assert_eq!(buffer.serialize_row(1), [0xC0, 0x00]);
    }

    fn any_orientation() -> impl Strategy<Value = Orientation> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(reversed, v_flipped, h_flipped)| {
            Orientation {
                reversed,
                v_flipped,
                h_flipped,
            }
        })
    }

    proptest! {
        #[test]
        fn prop_set_then_clear_restores_bit(
            rows in any::<[u16; ROWS]>(),
            col in any::<u8>(),
            row in any::<u8>(),
        ) {
            let mut buffer = MatrixBuffer::new();
            for (i, value) in rows.iter().enumerate() {
                buffer.set_row(i as u8, *value);
            }
            let before = buffer.pixel(col, row);

            buffer.set_pixel(col, row, 1);
            prop_assert!(buffer.pixel(col, row));
            buffer.set_pixel(col, row, 0);
            prop_assert!(!buffer.pixel(col, row));

            // Every other pixel is unchanged
            let mut expected = rows;
            let r = (row & ROW_MASK) as usize;
            expected[r] &= !(1 << (col & COL_MASK));
            prop_assert_eq!(buffer.rows(), &expected);

            if before {
                buffer.set_pixel(col, row, 1);
                prop_assert_eq!(buffer.rows(), &rows);
            }
        }

        #[test]
        fn prop_double_horizontal_flip_is_noop(
            rows in any::<[u16; ROWS]>(),
            orientation in any_orientation(),
        ) {
            let mut buffer = MatrixBuffer::new();
            for (i, value) in rows.iter().enumerate() {
                buffer.set_row(i as u8, *value);
            }
            buffer.set_orientation(orientation);
            let before = buffer.serialize();

            buffer.flip_horizontal();
            buffer.flip_horizontal();
            prop_assert_eq!(buffer.serialize(), before);
        }

        #[test]
        fn prop_clear_serializes_to_zero(orientation in any_orientation(), rows in any::<[u16; ROWS]>()) {
            let mut buffer = MatrixBuffer::new();
            for (i, value) in rows.iter().enumerate() {
                buffer.set_row(i as u8, *value);
            }
            buffer.set_orientation(orientation);
            buffer.clear();
            prop_assert_eq!(buffer.serialize(), [0u8; RAM_BYTES]);
        }

        #[test]
        fn prop_sprite_at_origin_copies_rows(rows in any::<[u16; ROWS]>(), height in 0usize..=ROWS) {
            let sprite = Sprite16::new(&rows[..height]);
            let mut buffer = MatrixBuffer::new();
            buffer.draw_sprite(&sprite);

            for r in 0..ROWS {
                let expected = if r < height { rows[r] } else { 0 };
                prop_assert_eq!(buffer.row(r as u8), expected);
            }
        }

        #[test]
        fn prop_serialize_is_deterministic(rows in any::<[u16; ROWS]>(), orientation in any_orientation()) {
            let mut buffer = MatrixBuffer::new();
            for (i, value) in rows.iter().enumerate() {
                buffer.set_row(i as u8, *value);
            }
            buffer.set_orientation(orientation);
            prop_assert_eq!(buffer.serialize(), buffer.serialize());
        }
    }
}
