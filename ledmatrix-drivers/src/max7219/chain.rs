//! MAX7219 display chain
//!
//! Owns the bus and the framebuffer for `N` chained modules and exposes
//! them through [`GfxDriver`] and [`IntensityControl`].

use ledmatrix_core::config::{Intensity, MODULE_SIZE};
use ledmatrix_core::state::{ChainEvent, ChainState};
use ledmatrix_core::traits::{Capabilities, GfxDriver, IntensityControl};
use ledmatrix_hal::{SpiBus, SpiConfig};

use super::encoder::Max7219Bus;
use super::framebuffer::{Framebuffer, PixelError, FRAME_ROWS};
use super::{reg, value};

/// Chain configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChainConfig {
    /// Bus clock and mode (1 MHz, mode 0 by default)
    pub spi: SpiConfig,
    /// Brightness applied during initialization
    pub intensity: Intensity,
}

/// Daisy chain of `N` MAX7219 8x8 modules
pub struct Max7219Chain<SPI, const N: usize> {
    bus: Max7219Bus<SPI>,
    framebuffer: Framebuffer<N>,
    config: ChainConfig,
    state: ChainState,
    intensity: Intensity,
}

impl<SPI: SpiBus, const N: usize> Max7219Chain<SPI, N> {
    /// Create a driver; the chips stay in shutdown until [`Self::init`]
    pub fn new(spi: SPI, config: ChainConfig) -> Self {
        Self {
            bus: Max7219Bus::new(spi),
            framebuffer: Framebuffer::new(),
            config,
            state: ChainState::Shutdown,
            intensity: config.intensity,
        }
    }

    /// Register writes performed by [`Self::init`], in order
    ///
    /// Shutdown is only left after the mode registers are set, as required
    /// by the chip's power-up sequence.
    pub fn init_sequence(intensity: Intensity) -> [(u8, u8); 5] {
        [
            (reg::DECODE_MODE, value::NO_DECODE),
            (reg::DISPLAY_TEST, value::TEST_OFF),
            (reg::SCAN_LIMIT, value::SCAN_ALL),
            (reg::SHUTDOWN, value::NORMAL_OPERATION),
            (reg::INTENSITY, intensity.value()),
        ]
    }

    /// Configure the bus and bring every device out of shutdown
    pub fn init(&mut self) -> Result<(), SPI::Error> {
        self.bus.spi_mut().configure(self.config.spi)?;
        self.bus.wait_ready();

        let intensity = self.config.intensity;
        for (command, data) in Self::init_sequence(intensity) {
            if let Err(e) = self.bus.send_command_to_all(command, data, N) {
                self.state = self.state.transition(ChainEvent::BusFault);
                return Err(e);
            }
            match command {
                reg::SCAN_LIMIT => self.state = self.state.transition(ChainEvent::Configured),
                reg::SHUTDOWN => self.state = self.state.transition(ChainEvent::PoweredOn),
                _ => {}
            }
        }
        self.intensity = intensity;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "MAX7219 chain up: {} modules, intensity {}",
            N,
            intensity.value()
        );

        Ok(())
    }

    /// Transmit all visible rows, one transfer per row
    ///
    /// Always a full redraw. Stops at the first failed transfer.
    pub fn flush(&mut self) -> Result<(), SPI::Error> {
        for (row, bytes) in self.framebuffer.visible_rows().enumerate() {
            self.bus.send_row_to_all(reg::DIGIT0 + row as u8, bytes, N)?;
        }
        Ok(())
    }

    /// Set or clear one pixel
    pub fn set_pixel(&mut self, x: usize, y: usize, enabled: bool) -> Result<(), PixelError> {
        self.framebuffer.set_pixel(x, y, enabled)
    }

    /// Pixel storage
    pub fn framebuffer(&self) -> &Framebuffer<N> {
        &self.framebuffer
    }

    /// Device power state
    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Borrow the underlying bus
    pub fn spi(&self) -> &SPI {
        self.bus.spi()
    }
}

impl<SPI: SpiBus, const N: usize> GfxDriver for Max7219Chain<SPI, N> {
    fn is_ready(&self) -> bool {
        true
    }

    fn clear(&mut self) {
        self.framebuffer.clear();
    }

    fn draw_pixel(&mut self, x: i32, y: i32, enabled: bool) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        // Off-canvas pixels are dropped; drawing never fails
        let _ = self.framebuffer.set_pixel(x, y, enabled);
    }

    fn update(&mut self) -> bool {
        match self.flush() {
            Ok(()) => true,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("MAX7219 row transfer failed, display is stale");
                false
            }
        }
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            width: (N * MODULE_SIZE) as u16,
            height: FRAME_ROWS as u16,
        }
    }
}

impl<SPI: SpiBus, const N: usize> IntensityControl for Max7219Chain<SPI, N> {
    type Error = SPI::Error;

    fn set_intensity(&mut self, intensity: Intensity) -> Result<(), Self::Error> {
        self.bus
            .send_command_to_all(reg::INTENSITY, intensity.value(), N)?;
        self.intensity = intensity;
        Ok(())
    }

    fn intensity(&self) -> Intensity {
        self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledmatrix_hal::mock::{MockSpi, MockSpiError};
    use ledmatrix_hal::Mode;

    type Chain4 = Max7219Chain<MockSpi, 4>;

    fn chain() -> Chain4 {
        Max7219Chain::new(MockSpi::new(), ChainConfig::default())
    }

    fn pairs(transfer: &[u8]) -> impl Iterator<Item = (u8, u8)> + '_ {
        transfer.chunks(2).map(|pair| (pair[0], pair[1]))
    }

    #[test]
    fn test_init_broadcasts_five_commands_in_order() {
        let mut chain = chain();
        chain.init().unwrap();

        let transfers = chain.spi().transfers();
        assert_eq!(transfers.len(), 5);

        let expected = [
            (0x09, 0x00),
            (0x0F, 0x00),
            (0x0B, 0x07),
            (0x0C, 0x01),
            (0x0A, 0x02),
        ];
        for (transfer, (command, data)) in transfers.iter().zip(expected) {
            assert_eq!(transfer.len(), 8);
            assert!(pairs(transfer).all(|pair| pair == (command, data)));
        }
    }

    #[test]
    fn test_init_configures_bus_and_state() {
        let mut chain = chain();
        assert_eq!(chain.state(), ChainState::Shutdown);

        chain.init().unwrap();

        let config = chain.spi().config().unwrap();
        assert_eq!(config.frequency, 1_000_000);
        assert_eq!(config.mode(), Mode::Mode0);
        assert!(chain.state().is_active());
    }

    #[test]
    fn test_init_uses_configured_intensity() {
        let config = ChainConfig {
            intensity: Intensity::MAX,
            ..ChainConfig::default()
        };
        let mut chain: Chain4 = Max7219Chain::new(MockSpi::new(), config);
        chain.init().unwrap();

        assert_eq!(
            chain.spi().last(),
            Some(&[0x0A, 15, 0x0A, 15, 0x0A, 15, 0x0A, 15][..])
        );
        assert_eq!(chain.intensity(), Intensity::MAX);
    }

    #[test]
    fn test_init_failure_leaves_chain_shut_down() {
        let mut spi = MockSpi::new();
        spi.fail_writes(true);
        let mut chain: Chain4 = Max7219Chain::new(spi, ChainConfig::default());

        assert_eq!(chain.init(), Err(MockSpiError::Injected));
        assert_eq!(chain.state(), ChainState::Shutdown);
    }

    #[test]
    fn test_init_failure_at_power_on_returns_to_shutdown() {
        // Decode, test and scan limit go through; the shutdown write fails
        let mut spi = MockSpi::new();
        spi.fail_after(3);
        let mut chain: Chain4 = Max7219Chain::new(spi, ChainConfig::default());

        assert_eq!(chain.init(), Err(MockSpiError::Injected));
        assert_eq!(chain.state(), ChainState::Shutdown);
        assert_eq!(chain.spi().transfers().len(), 3);
        assert_eq!(
            chain.spi().last(),
            Some(&[0x0B, 0x07, 0x0B, 0x07, 0x0B, 0x07, 0x0B, 0x07][..])
        );
    }

    #[test]
    fn test_init_failure_after_power_on_stays_active() {
        // Only the final intensity write fails
        let mut spi = MockSpi::new();
        spi.fail_after(4);
        let mut chain: Chain4 = Max7219Chain::new(spi, ChainConfig::default());

        assert_eq!(chain.init(), Err(MockSpiError::Injected));
        assert!(chain.state().is_active());
    }

    #[test]
    fn test_capabilities() {
        let caps = chain().capabilities();
        assert_eq!(
            caps,
            Capabilities {
                width: 32,
                height: 9
            }
        );
        assert!(chain().is_ready());
    }

    #[test]
    fn test_clear_then_update_sends_zero_rows() {
        let mut chain = chain();
        chain.draw_pixel(3, 4, true);
        chain.clear();
        assert!(chain.update());

        let transfers = chain.spi().transfers();
        assert_eq!(transfers.len(), 8);
        for (row, transfer) in transfers.iter().enumerate() {
            assert_eq!(transfer.len(), 8);
            assert!(pairs(transfer).all(|pair| pair == (row as u8 + 1, 0x00)));
        }
    }

    #[test]
    fn test_update_sends_row_bytes() {
        let mut chain = chain();
        // y = 7 -> register 2; x = 31 -> first pair (farthest device), bit 7
        chain.draw_pixel(31, 7, true);
        // y = 1 -> register 8; x = 0 -> last pair (nearest device), bit 0
        chain.draw_pixel(0, 1, true);
        assert!(chain.update());

        let transfers = chain.spi().transfers();
        assert_eq!(
            transfers[1].as_slice(),
            &[0x02, 0x80, 0x02, 0x00, 0x02, 0x00, 0x02, 0x00]
        );
        assert_eq!(
            transfers[7].as_slice(),
            &[0x08, 0x00, 0x08, 0x00, 0x08, 0x00, 0x08, 0x01]
        );
    }

    #[test]
    fn test_update_before_init_does_not_wait_for_configure() {
        let mut chain = chain();
        assert!(chain.update());

        assert_eq!(chain.spi().config(), None);
        assert_eq!(chain.spi().transfers().len(), 8);
        assert_eq!(chain.state(), ChainState::Shutdown);
    }

    #[test]
    fn test_update_is_full_redraw() {
        let mut chain = chain();
        assert!(chain.update());
        assert!(chain.update());
        assert_eq!(chain.spi().transfers().len(), 16);
    }

    #[test]
    fn test_update_reports_bus_failure() {
        let mut spi = MockSpi::new();
        spi.fail_writes(true);
        let mut chain: Chain4 = Max7219Chain::new(spi, ChainConfig::default());

        assert!(!chain.update());
    }

    #[test]
    fn test_draw_pixel_ignores_off_canvas() {
        let mut chain = chain();
        chain.draw_pixel(-1, 0, true);
        chain.draw_pixel(0, -1, true);
        chain.draw_pixel(32, 0, true);
        chain.draw_pixel(0, 9, true);

        assert!(chain.framebuffer().is_blank());
    }

    #[test]
    fn test_set_pixel_reports_out_of_bounds() {
        let mut chain = chain();
        assert_eq!(chain.set_pixel(0, 9, true), Err(PixelError::OutOfBounds));
        assert!(chain.set_pixel(0, 8, true).is_ok());
    }

    #[test]
    fn test_set_intensity_broadcasts() {
        let mut chain = chain();
        chain.set_intensity(Intensity::new(9).unwrap()).unwrap();

        assert_eq!(chain.spi().transfers().len(), 1);
        assert_eq!(
            chain.spi().last(),
            Some(&[0x0A, 9, 0x0A, 9, 0x0A, 9, 0x0A, 9][..])
        );
        assert_eq!(chain.intensity().value(), 9);
    }

    #[test]
    fn test_chain_of_eight() {
        let mut chain: Max7219Chain<MockSpi, 8> =
            Max7219Chain::new(MockSpi::new(), ChainConfig::default());
        chain.init().unwrap();

        assert!(chain.spi().transfers().iter().all(|t| t.len() == 16));
        assert_eq!(chain.capabilities().width, 64);
    }
}
