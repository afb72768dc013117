//! LED matrix driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in ledmatrix-core for LED driver chips:
//!
//! - MAX7219 daisy chains of 8x8 matrix modules

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod max7219;
