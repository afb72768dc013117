//! Hardware abstraction traits
//!
//! These traits define the interface between the graphics/application
//! layers and display-specific driver implementations.

pub mod gfx;

pub use gfx::{Capabilities, GfxDriver, IntensityControl};
