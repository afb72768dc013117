//! Remote command receive task
//!
//! Parses frames from the UART bridge and queues the decoded commands.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use ledmatrix_protocol::{FrameParser, RemoteCommand};

use crate::channels::COMMAND_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Remote RX task - receives and parses command frames
#[embassy_executor::task]
pub async fn remote_rx_task(mut rx: BufferedUartRx) {
    info!("Remote RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match RemoteCommand::from_frame(&frame) {
                            Ok(command) => queue_command(command),
                            Err(e) => warn!("Failed to decode remote command: {:?}", e),
                        },
                        Ok(None) => {}
                        Err(e) => warn!("Frame parse error: {:?}", e),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Hand a command to the display task, dropping it if the queue is full
fn queue_command(command: RemoteCommand) {
    debug!("Remote command on {}", command.topic().name());
    if COMMAND_CHANNEL.try_send(command).is_err() {
        warn!("Command channel full, dropping command");
    }
}
