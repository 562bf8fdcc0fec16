//! Bus-agnostic core logic for the HT16K33 LED matrix / key-scan controller
//!
//! This crate contains everything that does not touch the bus:
//!
//! - Pixel buffer and orientation transforms (8 rows x 16 columns)
//! - Sprites for bulk drawing
//! - Command byte encoding (the chip's register map)
//! - Key-scan snapshot decoding
//! - Start-up configuration types
//!
//! The protocol adapter in `ht16k33-driver` feeds the serialized buffer
//! and encoded commands to the bus.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod keyscan;
pub mod matrix;

pub use command::{BlinkRate, RowIntMode};
pub use config::DisplayConfig;
pub use keyscan::{Key, KeyScan};
pub use matrix::{MatrixBuffer, Orientation, Sprite, Sprite16};
