//! Display buffer and transform engine
//!
//! The buffer holds one 16-bit word per display row. Bit `n` of a row word
//! is column `n`. Coordinates are never rejected: columns wrap at 16, rows
//! at 8, pixel values are reduced to their lowest bit.
//!
//! Before transmission each row passes through the orientation pipeline
//! (see [`MatrixBuffer::serialize_row`]).

mod buffer;
mod orientation;
mod sprite;

pub use buffer::MatrixBuffer;
pub use orientation::{reverse_bits16, Orientation};
pub use sprite::{Sprite, Sprite16};

/// Number of display rows
pub const ROWS: usize = 8;

/// Number of display columns (bits per row word)
pub const COLS: usize = 16;

/// Bytes in a full display RAM image (2 per row)
pub const RAM_BYTES: usize = ROWS * 2;

/// Mask applied to column indices
pub const COL_MASK: u8 = 0x0F;

/// Mask applied to row indices
pub const ROW_MASK: u8 = 0x07;
