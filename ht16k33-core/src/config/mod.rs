//! Configuration types
//!
//! Start-up settings for a display. With the `serde` feature enabled the
//! configuration can be stored as postcard-serialized binary data (e.g. in
//! a flash sector next to other application settings).

mod display;

pub use display::{ConfigError, DisplayConfig, MAX_ENCODED_LEN};
