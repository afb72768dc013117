//! Ledmatrix Hardware Abstraction Layer
//!
//! This crate defines the bus abstraction that display drivers are written
//! against. Chip-specific code (the RP2040 HAL, host test doubles)
//! implements these traits so the driver logic never touches registers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ledmatrix-drivers (MAX7219 chain)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledmatrix-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ ledmatrix-hal │       │  mock::MockSpi│
//! │   -rp2040     │       │  (host tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiBus`] - Blocking SPI master, write-only transfers

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "mock")]
pub mod mock;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use spi::{Mode, SpiBus, SpiConfig};
