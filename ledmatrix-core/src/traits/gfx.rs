//! Graphics driver capability trait
//!
//! A graphics layer (text rendering, primitives) only ever talks to a
//! display through [`GfxDriver`]. It never sees the framebuffer layout or
//! the bus, so the same layer can drive any monochrome pixel display.

use crate::config::Intensity;

/// Drawable area reported by a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Capabilities {
    /// Check whether a pixel address falls inside the drawable area
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }
}

/// Pixel-level display driver
///
/// Drawing calls are cheap in-memory operations; nothing reaches the
/// hardware until [`GfxDriver::update`] is called.
pub trait GfxDriver {
    /// Check whether the driver can accept drawing calls
    fn is_ready(&self) -> bool;

    /// Turn every pixel off
    fn clear(&mut self);

    /// Set or clear a single pixel
    ///
    /// Addresses outside [`GfxDriver::capabilities`] are ignored.
    fn draw_pixel(&mut self, x: i32, y: i32, enabled: bool);

    /// Push the whole pixel buffer to the hardware
    ///
    /// Returns `false` if the transfer failed. The display then keeps
    /// showing its previous content; nothing is retried.
    fn update(&mut self) -> bool;

    /// Drawable area
    fn capabilities(&self) -> Capabilities;
}

/// Displays with adjustable brightness
pub trait IntensityControl {
    /// Error type for brightness changes
    type Error;

    /// Apply a new brightness level immediately
    fn set_intensity(&mut self, intensity: Intensity) -> Result<(), Self::Error>;

    /// Brightness level last applied
    fn intensity(&self) -> Intensity;
}
