//! HT16K33 Hardware Abstraction Layer
//!
//! This crate defines the bus capability the HT16K33 driver needs, so the
//! driver can run against any I2C master (or a fake one in tests).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application                            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ht16k33-driver (protocol adapter)      │
//! └─────────────────────────────────────────┘
//!         │                       │
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ ht16k33-core  │       │ ht16k33-hal   │
//! │ (buffer, cmd) │       │ (this crate)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations
//!
//! [`i2c::EmbeddedHalBus`] adapts any `embedded-hal` 1.0 blocking I2C
//! implementation to [`i2c::I2cBus`].

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key types at crate root for convenience
pub use i2c::{BusError, EmbeddedHalBus, I2cBus};
