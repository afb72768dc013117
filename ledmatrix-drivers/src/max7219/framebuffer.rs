//! Pixel storage for a MAX7219 chain
//!
//! One byte per module per row, row-major. Within a row the module nearest
//! the controller is stored last, because its data is the last pair
//! clocked into the chain.
//!
//! Logical row `y` lives in storage row `8 - y`. Logical row 0 therefore
//! maps to storage row 8, which is never transmitted: the graphics layer
//! sees a 9-pixel-high canvas whose top row is always blank.

use ledmatrix_core::config::{MAX_CHAIN_LEN, MODULE_SIZE};

/// Rows transmitted to the devices
pub const VISIBLE_ROWS: usize = MODULE_SIZE;

/// Rows held in memory (visible rows plus the reserved top row)
pub const FRAME_ROWS: usize = VISIBLE_ROWS + 1;

/// Pixel addressing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelError {
    /// Coordinates outside the chain's width or height
    OutOfBounds,
}

/// Byte offset and bit mask for one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelLocation {
    /// Offset into the row-major byte sequence
    pub offset: usize,
    /// Single-bit mask within that byte
    pub mask: u8,
}

/// Framebuffer for `N` chained modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer<const N: usize> {
    rows: [[u8; N]; FRAME_ROWS],
}

impl<const N: usize> Default for Framebuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Framebuffer<N> {
    const CHAIN_LEN_OK: () = assert!(
        N >= 1 && N <= MAX_CHAIN_LEN,
        "chain length must be between 1 and MAX_CHAIN_LEN"
    );

    /// Width in pixels
    pub const WIDTH: usize = N * MODULE_SIZE;

    /// Height in pixels, including the reserved row
    pub const HEIGHT: usize = FRAME_ROWS;

    /// Total bytes held
    pub const LEN: usize = N * FRAME_ROWS;

    /// Create a blank framebuffer
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CHAIN_LEN_OK;
        Self {
            rows: [[0; N]; FRAME_ROWS],
        }
    }

    /// Map a pixel address to its byte offset and bit
    ///
    /// Returns `None` outside `WIDTH` x `HEIGHT`.
    pub fn locate(x: usize, y: usize) -> Option<PixelLocation> {
        if x >= Self::WIDTH || y >= Self::HEIGHT {
            return None;
        }

        let module = x / MODULE_SIZE;
        let bit = x % MODULE_SIZE;
        let column = (N - 1) - module;
        let row = VISIBLE_ROWS - y;

        Some(PixelLocation {
            offset: column + row * N,
            mask: 1 << bit,
        })
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        for row in self.rows.iter_mut() {
            row.fill(0);
        }
    }

    /// Set or clear one pixel, leaving the other bits of its byte alone
    pub fn set_pixel(&mut self, x: usize, y: usize, enabled: bool) -> Result<(), PixelError> {
        let location = Self::locate(x, y).ok_or(PixelError::OutOfBounds)?;
        let byte = &mut self.rows[location.offset / N][location.offset % N];

        if enabled {
            *byte |= location.mask;
        } else {
            *byte &= !location.mask;
        }

        Ok(())
    }

    /// Read one pixel
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        let location = Self::locate(x, y)?;
        self.byte(location.offset).map(|byte| byte & location.mask != 0)
    }

    /// Byte at a row-major offset
    pub fn byte(&self, offset: usize) -> Option<u8> {
        self.rows.get(offset / N).map(|row| row[offset % N])
    }

    /// Storage row, one byte per module (farthest module first)
    pub fn row(&self, row: usize) -> Option<&[u8; N]> {
        self.rows.get(row)
    }

    /// Rows sent to the devices, in register order
    pub fn visible_rows(&self) -> impl Iterator<Item = &[u8; N]> {
        self.rows.iter().take(VISIBLE_ROWS)
    }

    /// All bytes in row-major order
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }

    /// Check whether every pixel is off
    pub fn is_blank(&self) -> bool {
        self.bytes().all(|byte| byte == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type Fb4 = Framebuffer<4>;

    #[test]
    fn test_dimensions() {
        assert_eq!(Fb4::WIDTH, 32);
        assert_eq!(Fb4::HEIGHT, 9);
        assert_eq!(Fb4::LEN, 36);
        assert_eq!(Fb4::new().bytes().count(), 36);
    }

    #[test]
    fn test_origin_maps_to_reserved_row() {
        // module 0, bit 0, stored at (3 - 0) + (8 - 0) * 4
        let mut fb = Fb4::new();
        fb.set_pixel(0, 0, true).unwrap();

        assert_eq!(
            Fb4::locate(0, 0),
            Some(PixelLocation {
                offset: 35,
                mask: 0x01
            })
        );
        assert_eq!(fb.byte(35), Some(0x01));
        // Reserved row is not part of what gets transmitted
        assert!(fb.visible_rows().all(|row| row == &[0; 4]));
    }

    #[test]
    fn test_last_column_bottom_row() {
        // x = 31 -> module 3, bit 7; y = 7 -> (3 - 3) + (8 - 7) * 4
        let mut fb = Fb4::new();
        fb.set_pixel(31, 7, true).unwrap();

        assert_eq!(fb.byte(4), Some(0x80));
        assert_eq!(fb.row(1), Some(&[0x80, 0, 0, 0]));
    }

    #[test]
    fn test_module_order_is_reversed() {
        let mut fb = Fb4::new();
        fb.set_pixel(0, 8, true).unwrap(); // module 0
        fb.set_pixel(9, 8, true).unwrap(); // module 1, bit 1

        // y = 8 -> storage row 0; module 0 is the last byte
        assert_eq!(fb.row(0), Some(&[0x00, 0x00, 0x02, 0x01]));
    }

    #[test]
    fn test_clear_pixel_keeps_neighbours() {
        let mut fb = Fb4::new();
        fb.set_pixel(2, 3, true).unwrap();
        fb.set_pixel(5, 3, true).unwrap();
        fb.set_pixel(2, 3, false).unwrap();

        assert_eq!(fb.pixel(2, 3), Some(false));
        assert_eq!(fb.pixel(5, 3), Some(true));
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut fb = Fb4::new();
        assert_eq!(fb.set_pixel(32, 0, true), Err(PixelError::OutOfBounds));
        assert_eq!(fb.set_pixel(0, 9, true), Err(PixelError::OutOfBounds));
        assert!(fb.is_blank());
        assert_eq!(fb.pixel(40, 0), None);
    }

    #[test]
    fn test_clear() {
        let mut fb = Fb4::new();
        for x in 0..32 {
            fb.set_pixel(x, x % 9, true).unwrap();
        }
        assert!(!fb.is_blank());

        fb.clear();
        assert!(fb.is_blank());
    }

    #[test]
    fn test_single_module_chain() {
        assert_eq!(
            Framebuffer::<1>::locate(7, 1),
            Some(PixelLocation {
                offset: 7,
                mask: 0x80
            })
        );
    }

    proptest! {
        #[test]
        fn prop_mapping_matches_formula(x in 0usize..32, y in 0usize..9) {
            let location = Fb4::locate(x, y).unwrap();
            prop_assert_eq!(location.offset, (3 - x / 8) + (8 - y) * 4);
            prop_assert_eq!(location.mask, 1u8 << (x % 8));
        }

        #[test]
        fn prop_set_then_clear_restores_byte(
            seed in proptest::collection::vec((0usize..32, 0usize..9), 0..40),
            x in 0usize..32,
            y in 0usize..9,
        ) {
            let mut fb = Fb4::new();
            for (sx, sy) in seed {
                fb.set_pixel(sx, sy, true).unwrap();
            }
            let offset = Fb4::locate(x, y).unwrap().offset;
            let mask = Fb4::locate(x, y).unwrap().mask;
            let before = fb.byte(offset).unwrap();

            fb.set_pixel(x, y, true).unwrap();
            fb.set_pixel(x, y, false).unwrap();

            prop_assert_eq!(fb.byte(offset).unwrap(), before & !mask);
            // Bits other than the pixel's own are never touched
            prop_assert_eq!(fb.byte(offset).unwrap() | mask, before | mask);
        }

        #[test]
        fn prop_every_pixel_has_a_unique_location(
            a in (0usize..32, 0usize..9),
            b in (0usize..32, 0usize..9),
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(Fb4::locate(a.0, a.1), Fb4::locate(b.0, b.1));
        }
    }
}
