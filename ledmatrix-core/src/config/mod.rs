//! Configuration types
//!
//! Board-agnostic display configuration. The firmware fills these from its
//! build-time `display.toml`.

pub mod types;

pub use types::*;
