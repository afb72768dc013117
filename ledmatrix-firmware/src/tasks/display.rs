//! Display task
//!
//! Sole owner of the MAX7219 chain. Applies remote commands one at a time,
//! so a redraw always completes before the next command is looked at.

use defmt::*;
use embassy_rp::peripherals::SPI0;

use ledmatrix_display::{CommandOutcome, MatrixController};
use ledmatrix_drivers::max7219::Max7219Chain;
use ledmatrix_hal_rp2040::Rp2040SpiBus;

use crate::channels::COMMAND_CHANNEL;
use crate::config::MODULE_COUNT;

/// The chain as wired on the board
pub type Chain = Max7219Chain<Rp2040SpiBus<'static, SPI0>, MODULE_COUNT>;

/// Command handler owning the chain
pub type Display = MatrixController<Chain>;

/// Display task - applies queued remote commands
#[embassy_executor::task]
pub async fn display_task(mut display: Display) {
    info!("Display task started");

    loop {
        let command = COMMAND_CHANNEL.receive().await;

        match display.handle(&command) {
            CommandOutcome::TextShown => debug!("Text updated"),
            CommandOutcome::DisplayStale => warn!("Text update failed, display is stale"),
            CommandOutcome::IntensityApplied(intensity) => {
                debug!("Intensity set to {}", intensity.value())
            }
            CommandOutcome::IntensityIgnored => debug!("Intensity out of range, ignored"),
            CommandOutcome::IntensityFailed => warn!("Intensity update failed"),
        }
    }
}
