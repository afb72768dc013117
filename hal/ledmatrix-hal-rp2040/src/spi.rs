//! Blocking SPI transport for the RP2040
//!
//! Wraps a transmit-only `embassy-rp` SPI peripheral together with the
//! chip-select pin. Each [`SpiBus::write`] is one chip-select frame: the
//! MAX7219 latches the shifted data on the rising edge.
//!
//! Implements the `SpiBus` trait from `ledmatrix-hal`.

use embassy_rp::gpio::Output;
use embassy_rp::spi::{self, Blocking, Instance, Phase as RpPhase, Polarity as RpPolarity, Spi};

use ledmatrix_hal::spi::{Phase, Polarity};
use ledmatrix_hal::{SpiBus, SpiConfig};

/// SPI transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError {
    /// Peripheral reported a transfer error
    Transfer,
}

/// RP2040 SPI bus with a software chip select
pub struct Rp2040SpiBus<'d, T: Instance> {
    spi: Spi<'d, T, Blocking>,
    cs: Output<'d>,
}

impl<'d, T: Instance> Rp2040SpiBus<'d, T> {
    /// Wrap an SPI peripheral and its chip-select output
    ///
    /// Chip select is driven high (idle) immediately.
    pub fn new(spi: Spi<'d, T, Blocking>, mut cs: Output<'d>) -> Self {
        cs.set_high();
        Self { spi, cs }
    }

    /// Convert a bus configuration into the peripheral's format
    fn peripheral_config(config: SpiConfig) -> spi::Config {
        let mut cfg = spi::Config::default();
        cfg.frequency = config.frequency;
        cfg.polarity = match config.polarity {
            Polarity::IdleLow => RpPolarity::IdleLow,
            Polarity::IdleHigh => RpPolarity::IdleHigh,
        };
        cfg.phase = match config.phase {
            Phase::CaptureOnFirstTransition => RpPhase::CaptureOnFirstTransition,
            Phase::CaptureOnSecondTransition => RpPhase::CaptureOnSecondTransition,
        };
        cfg
    }
}

impl<'d, T: Instance> SpiBus for Rp2040SpiBus<'d, T> {
    type Error = SpiError;

    fn configure(&mut self, config: SpiConfig) -> Result<(), Self::Error> {
        self.spi.set_config(&Self::peripheral_config(config));

        #[cfg(feature = "defmt")]
        defmt::debug!("SPI configured at {} Hz", config.frequency);

        Ok(())
    }

    fn is_ready(&self) -> bool {
        // Writes block until the shift register drains, so the bus is idle
        // whenever we get to ask. The peripheral runs on its default config
        // until `configure` is called.
        true
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.cs.set_low();
        let result = self.spi.blocking_write(bytes);
        self.cs.set_high();
        result.map_err(|_| SpiError::Transfer)
    }
}
