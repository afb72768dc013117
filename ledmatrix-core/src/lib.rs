//! Board-agnostic core types for the LED matrix firmware
//!
//! This crate contains everything that does not depend on a specific
//! display chip or microcontroller:
//!
//! - The graphics capability trait consumed by text/graphics layers
//! - Display configuration types (intensity, boot text, chain limits)
//! - The chain power state machine

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod state;
pub mod traits;
