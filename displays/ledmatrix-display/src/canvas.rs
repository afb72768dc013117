//! `embedded-graphics` draw target over a pixel driver
//!
//! The canvas size is whatever the driver reports through
//! [`GfxDriver::capabilities`]. Pixels outside it are clipped here, before
//! they reach the driver.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use ledmatrix_core::traits::GfxDriver;

/// Font used by [`Canvas::draw_string`]
///
/// Eight pixels tall, so a line of text exactly fills the visible rows of
/// an 8x8 module below the reserved top row.
pub const TEXT_FONT: &MonoFont<'static> = &FONT_5X8;

/// Monochrome drawing surface backed by a [`GfxDriver`]
#[derive(Debug)]
pub struct Canvas<D> {
    driver: D,
}

impl<D: GfxDriver> Canvas<D> {
    /// Wrap a driver
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// Borrow the driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutably borrow the driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Push the drawn content to the hardware
    pub fn update(&mut self) -> bool {
        self.driver.update()
    }

    /// Draw `text` with its top-left corner at (`x`, `y`)
    ///
    /// Returns the x coordinate just past the last character. Glyphs that
    /// run off the canvas are clipped.
    pub fn draw_string(&mut self, x: i32, y: i32, text: &str) -> i32 {
        let style = MonoTextStyle::new(TEXT_FONT, BinaryColor::On);
        let next = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
            .draw(self)
            .unwrap_or_else(|never| match never {});
        next.x
    }
}

impl<D: GfxDriver> OriginDimensions for Canvas<D> {
    fn size(&self) -> Size {
        let caps = self.driver.capabilities();
        Size::new(caps.width as u32, caps.height as u32)
    }
}

impl<D: GfxDriver> DrawTarget for Canvas<D> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let caps = self.driver.capabilities();
        for Pixel(point, color) in pixels {
            if caps.contains(point.x, point.y) {
                self.driver.draw_pixel(point.x, point.y, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.driver.clear();
        if color.is_on() {
            let area = self.bounding_box();
            self.fill_solid(&area, color)?;
        }
        Ok(())
    }
}
