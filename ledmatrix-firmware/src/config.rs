//! Display configuration baked in at build time
//!
//! `build.rs` validates `display.toml` and emits the constants included
//! below, so the chain length is a compile-time constant.

use ledmatrix_core::config::{DisplayConfig, Intensity};
use ledmatrix_drivers::max7219::ChainConfig;
use ledmatrix_hal::{Mode, SpiConfig};

include!(concat!(env!("OUT_DIR"), "/display_config.rs"));

/// Power-up settings from `display.toml`
pub fn display_config() -> DisplayConfig {
    // Both values were range-checked by build.rs
    let intensity = Intensity::try_from(DEFAULT_INTENSITY).unwrap_or_default();
    DisplayConfig::new(intensity, BOOT_TEXT).unwrap_or_default()
}

/// Chain settings: configured clock, mode 0 as the MAX7219 expects
pub fn chain_config(display: &DisplayConfig) -> ChainConfig {
    ChainConfig {
        spi: SpiConfig::new(SPI_FREQUENCY_HZ, Mode::Mode0),
        intensity: display.intensity,
    }
}
