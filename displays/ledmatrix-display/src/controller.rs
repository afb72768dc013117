//! Remote command handling
//!
//! Applies [`RemoteCommand`]s to a display. Each command triggers at most
//! one redraw and returns before the next one is processed.

use embedded_graphics::prelude::Point;

use ledmatrix_core::config::Intensity;
use ledmatrix_core::traits::{GfxDriver, IntensityControl};
use ledmatrix_protocol::RemoteCommand;

use crate::canvas::Canvas;

/// Top-left corner of displayed text
///
/// Row 0 is the blank reserved row, so text starts one pixel down.
pub const TEXT_ORIGIN: Point = Point::new(0, 1);

/// Result of applying one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// Text drawn and pushed to the display
    TextShown,
    /// Text drawn but the transfer failed; the display shows old content
    DisplayStale,
    /// New brightness sent to every module
    IntensityApplied(Intensity),
    /// Brightness outside 0-15, nothing sent
    IntensityIgnored,
    /// Brightness transfer failed
    IntensityFailed,
}

/// Applies remote commands to a matrix display
#[derive(Debug)]
pub struct MatrixController<D> {
    canvas: Canvas<D>,
}

impl<D: GfxDriver + IntensityControl> MatrixController<D> {
    /// Take ownership of an initialized display driver
    pub fn new(driver: D) -> Self {
        Self {
            canvas: Canvas::new(driver),
        }
    }

    /// Borrow the display driver
    pub fn driver(&self) -> &D {
        self.canvas.driver()
    }

    /// Replace the display content with `text`
    ///
    /// Clear, draw and update in one go: a full redraw every time.
    pub fn show_text(&mut self, text: &str) -> bool {
        self.canvas.driver_mut().clear();
        self.canvas.draw_string(TEXT_ORIGIN.x, TEXT_ORIGIN.y, text);
        self.canvas.update()
    }

    /// Apply a brightness value from an untrusted source
    ///
    /// Values outside 0-15 are ignored without touching the bus.
    pub fn set_intensity(&mut self, value: i32) -> CommandOutcome {
        let Some(intensity) = Intensity::new(value) else {
            #[cfg(feature = "defmt")]
            defmt::debug!("Ignoring intensity {}", value);
            return CommandOutcome::IntensityIgnored;
        };

        match self.canvas.driver_mut().set_intensity(intensity) {
            Ok(()) => CommandOutcome::IntensityApplied(intensity),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Intensity transfer failed");
                CommandOutcome::IntensityFailed
            }
        }
    }

    /// Apply one remote command
    pub fn handle(&mut self, command: &RemoteCommand) -> CommandOutcome {
        match command {
            RemoteCommand::SetText(text) => {
                if self.show_text(text) {
                    CommandOutcome::TextShown
                } else {
                    CommandOutcome::DisplayStale
                }
            }
            RemoteCommand::SetIntensity(value) => self.set_intensity(*value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledmatrix_drivers::max7219::{ChainConfig, Max7219Chain};
    use ledmatrix_hal::mock::MockSpi;

    type Controller = MatrixController<Max7219Chain<MockSpi, 4>>;

    fn controller() -> Controller {
        let mut chain: Max7219Chain<MockSpi, 4> =
            Max7219Chain::new(MockSpi::new(), ChainConfig::default());
        chain.init().unwrap();
        MatrixController::new(chain)
    }

    fn transfer_count(controller: &Controller) -> usize {
        controller.driver().spi().transfers().len()
    }

    #[test]
    fn test_set_text_clears_draws_and_updates() {
        let mut controller = controller();
        let before = transfer_count(&controller);

        let outcome = controller.handle(&RemoteCommand::text("Hi"));

        assert_eq!(outcome, CommandOutcome::TextShown);
        assert_eq!(transfer_count(&controller), before + 8);
        assert!(!controller.driver().framebuffer().is_blank());
    }

    #[test]
    fn test_set_text_replaces_previous_content() {
        let mut controller = controller();
        controller.handle(&RemoteCommand::text("WWWWW"));
        controller.handle(&RemoteCommand::text(""));

        assert!(controller.driver().framebuffer().is_blank());
        // Last 8 transfers are all-zero rows
        let transfers = controller.driver().spi().transfers();
        for transfer in &transfers[transfers.len() - 8..] {
            assert!(transfer.chunks(2).all(|pair| pair[1] == 0));
        }
    }

    #[test]
    fn test_intensity_in_range_is_broadcast() {
        let mut controller = controller();
        let outcome = controller.handle(&RemoteCommand::SetIntensity(15));

        assert_eq!(outcome, CommandOutcome::IntensityApplied(Intensity::MAX));
        assert_eq!(
            controller.driver().spi().last(),
            Some(&[0x0A, 15, 0x0A, 15, 0x0A, 15, 0x0A, 15][..])
        );
    }

    #[test]
    fn test_intensity_out_of_range_is_ignored() {
        let mut controller = controller();
        controller.handle(&RemoteCommand::SetIntensity(7));
        let before = transfer_count(&controller);

        for value in [16, -1, i32::MAX, i32::MIN] {
            let outcome = controller.handle(&RemoteCommand::SetIntensity(value));
            assert_eq!(outcome, CommandOutcome::IntensityIgnored);
        }

        assert_eq!(transfer_count(&controller), before);
        assert_eq!(controller.driver().intensity().value(), 7);
    }

    #[test]
    fn test_failed_update_is_reported() {
        let mut spi = MockSpi::new();
        spi.fail_writes(true);
        let chain: Max7219Chain<MockSpi, 4> = Max7219Chain::new(spi, ChainConfig::default());
        let mut controller = MatrixController::new(chain);

        assert_eq!(
            controller.handle(&RemoteCommand::text("x")),
            CommandOutcome::DisplayStale
        );
        assert_eq!(
            controller.handle(&RemoteCommand::SetIntensity(3)),
            CommandOutcome::IntensityFailed
        );
    }
}
