//! MAX7219 8x8 LED matrix driver
//!
//! The MAX7219 is a serially interfaced LED display driver. Each chip takes
//! 16-bit words (register address, then data) through a shift register
//! whose output feeds the next chip in the chain.
//!
//! # Chain Protocol
//!
//! There is no device addressing. While chip-select is low every word
//! shifted in pushes the previous word one device further down the chain;
//! when chip-select rises each device latches whatever word it holds. A
//! transfer for `n` devices is therefore `n` interleaved pairs:
//!
//! ```text
//! ┌──────┬───────┬──────┬───────┬─────┬──────────┬───────────┐
//! │ CMD0 │ DATA0 │ CMD1 │ DATA1 │ ... │ CMD(n-1) │ DATA(n-1) │
//! └──────┴───────┴──────┴───────┴─────┴──────────┴───────────┘
//! ```
//!
//! The first pair ends up in the device furthest from the controller.

pub mod chain;
pub mod encoder;
pub mod framebuffer;

pub use chain::{ChainConfig, Max7219Chain};
pub use encoder::{Max7219Bus, MAX_TRANSFER_LEN};
pub use framebuffer::{Framebuffer, PixelError, PixelLocation, FRAME_ROWS, VISIBLE_ROWS};

/// MAX7219 register addresses
pub mod reg {
    /// No-op, used to skip a device in the chain
    pub const NOOP: u8 = 0x00;
    /// First digit/row register; rows 0-7 are `DIGIT0 + row`
    pub const DIGIT0: u8 = 0x01;
    /// BCD decode mode per digit
    pub const DECODE_MODE: u8 = 0x09;
    /// LED brightness (low nibble)
    pub const INTENSITY: u8 = 0x0A;
    /// Number of scanned digits minus one
    pub const SCAN_LIMIT: u8 = 0x0B;
    /// 0 = shutdown, 1 = normal operation
    pub const SHUTDOWN: u8 = 0x0C;
    /// 1 = all LEDs on
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// Register values used by the driver
pub mod value {
    /// Raw segment data, no BCD decoding
    pub const NO_DECODE: u8 = 0x00;
    /// Display test off
    pub const TEST_OFF: u8 = 0x00;
    /// Scan all 8 digits
    pub const SCAN_ALL: u8 = 0x07;
    /// Leave shutdown mode
    pub const NORMAL_OPERATION: u8 = 0x01;
}
