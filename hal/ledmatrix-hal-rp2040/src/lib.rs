//! RP2040-specific HAL for the LED matrix firmware
//!
//! Implements the shared `ledmatrix-hal` traits on top of `embassy-rp`.

#![no_std]

pub mod spi;

pub use spi::{Rp2040SpiBus, SpiError};
