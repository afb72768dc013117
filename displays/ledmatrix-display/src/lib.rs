//! Graphics layer and remote command handling for LED matrix displays
//!
//! This crate provides:
//! - `Canvas`, an `embedded-graphics` draw target over any `GfxDriver`
//! - Text rendering onto the canvas with a built-in monospace font
//! - `MatrixController`, which applies remote commands to a display
//!
//! # Architecture
//!
//! The canvas and controller only see the five `GfxDriver` operations and
//! `IntensityControl`. Framebuffer layout and bus traffic stay inside the
//! driver crate, so any monochrome driver can be plugged in.

#![cfg_attr(not(test), no_std)]

pub mod canvas;
pub mod controller;

// Re-export key types
pub use canvas::{Canvas, TEXT_FONT};
pub use controller::{CommandOutcome, MatrixController, TEXT_ORIGIN};
