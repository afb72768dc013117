//! Command encoding for MAX7219 chains
//!
//! Builds the interleaved command/data transfers and pushes them through a
//! [`SpiBus`]. Requests for more devices than [`MAX_CHAIN_LEN`] are clamped
//! instead of rejected so a bad chain length never stops the display.

use heapless::Vec;

use ledmatrix_core::config::MAX_CHAIN_LEN;
use ledmatrix_hal::SpiBus;

/// Longest transfer the encoder ever emits (one pair per device)
pub const MAX_TRANSFER_LEN: usize = 2 * MAX_CHAIN_LEN;

/// Encoded transfer
pub type Transfer = Vec<u8, MAX_TRANSFER_LEN>;

/// Clamp a requested chain length to [`MAX_CHAIN_LEN`]
pub const fn clamp_chain_length(chain_length: usize) -> usize {
    if chain_length > MAX_CHAIN_LEN {
        MAX_CHAIN_LEN
    } else {
        chain_length
    }
}

/// Encode the same command and value for every device
pub fn encode_broadcast(command: u8, value: u8, chain_length: usize) -> Transfer {
    let mut transfer = Transfer::new();
    for _ in 0..clamp_chain_length(chain_length) {
        // Capacity is 2 * MAX_CHAIN_LEN and the count is clamped to MAX_CHAIN_LEN
        let _ = transfer.push(command);
        let _ = transfer.push(value);
    }
    transfer
}

/// Encode one shared command with a distinct data byte per device
///
/// `values[0]` goes into the first pair, which is shifted to the far end
/// of the chain. If fewer values than `chain_length` are supplied only
/// those are sent.
pub fn encode_row(command: u8, values: &[u8], chain_length: usize) -> Transfer {
    let count = clamp_chain_length(chain_length).min(values.len());
    let mut transfer = Transfer::new();
    for &value in &values[..count] {
        let _ = transfer.push(command);
        let _ = transfer.push(value);
    }
    transfer
}

/// MAX7219 chain bus
///
/// Wraps the SPI bus and issues exactly one transfer per call. Failed
/// transfers are returned to the caller and never retried here.
#[derive(Debug)]
pub struct Max7219Bus<SPI> {
    spi: SPI,
}

impl<SPI: SpiBus> Max7219Bus<SPI> {
    /// Wrap an SPI bus
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Borrow the underlying bus
    pub fn spi(&self) -> &SPI {
        &self.spi
    }

    /// Mutably borrow the underlying bus
    pub fn spi_mut(&mut self) -> &mut SPI {
        &mut self.spi
    }

    /// Busy-wait until the bus accepts a transfer
    pub fn wait_ready(&self) {
        while !self.spi.is_ready() {
            core::hint::spin_loop();
        }
    }

    /// Write one register on a single (or the nearest) device
    pub fn send_command(&mut self, command: u8, value: u8) -> Result<(), SPI::Error> {
        self.transfer(&[command, value])
    }

    /// Write the same register value on every device
    pub fn send_command_to_all(
        &mut self,
        command: u8,
        value: u8,
        chain_length: usize,
    ) -> Result<(), SPI::Error> {
        let transfer = encode_broadcast(command, value, chain_length);
        self.transfer(&transfer)
    }

    /// Write one register on every device with per-device data
    pub fn send_row_to_all(
        &mut self,
        command: u8,
        values: &[u8],
        chain_length: usize,
    ) -> Result<(), SPI::Error> {
        let transfer = encode_row(command, values, chain_length);
        self.transfer(&transfer)
    }

    fn transfer(&mut self, data: &[u8]) -> Result<(), SPI::Error> {
        self.wait_ready();
        self.spi.write(data)
    }
}
