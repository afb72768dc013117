//! Recording SPI bus for host tests
//!
//! [`MockSpi`] keeps every transfer it receives so tests can assert on the
//! exact bytes a driver put on the wire.

use core::cell::Cell;

use heapless::Vec;

use crate::spi::{SpiBus, SpiConfig};

/// Largest single transfer the mock records
pub const MAX_TRANSFER_LEN: usize = 32;

/// Number of transfers kept before the oldest are dropped
pub const MAX_TRANSFERS: usize = 64;

/// One recorded transfer
pub type Transfer = Vec<u8, MAX_TRANSFER_LEN>;

/// Errors raised by the mock bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MockSpiError {
    /// Failure injected with [`MockSpi::fail_writes`] or [`MockSpi::fail_after`]
    Injected,
    /// A write was issued while the bus reported not-ready
    NotReady,
    /// Transfer longer than [`MAX_TRANSFER_LEN`]
    TooLong,
}

/// SPI bus that records writes instead of driving hardware
#[derive(Debug, Default)]
pub struct MockSpi {
    transfers: Vec<Transfer, MAX_TRANSFERS>,
    config: Option<SpiConfig>,
    busy_polls: Cell<u8>,
    /// Writes still accepted before every further write fails
    writes_left: Option<usize>,
}

impl MockSpi {
    /// Create an idle, ready bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Report not-ready for the next `polls` readiness checks
    pub fn busy_for(&mut self, polls: u8) {
        self.busy_polls.set(polls);
    }

    /// Make every following write fail
    pub fn fail_writes(&mut self, fail: bool) {
        self.writes_left = if fail { Some(0) } else { None };
    }

    /// Accept the next `writes` writes, then fail every following one
    pub fn fail_after(&mut self, writes: usize) {
        self.writes_left = Some(writes);
    }

    /// Configuration applied through [`SpiBus::configure`]
    pub fn config(&self) -> Option<SpiConfig> {
        self.config
    }

    /// All recorded transfers, oldest first
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Most recent transfer
    pub fn last(&self) -> Option<&[u8]> {
        self.transfers.last().map(|t| t.as_slice())
    }
}

impl SpiBus for MockSpi {
    type Error = MockSpiError;

    fn configure(&mut self, config: SpiConfig) -> Result<(), Self::Error> {
        self.config = Some(config);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        let remaining = self.busy_polls.get();
        if remaining == 0 {
            return true;
        }
        self.busy_polls.set(remaining - 1);
        false
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.busy_polls.get() > 0 {
            return Err(MockSpiError::NotReady);
        }
        if self.writes_left == Some(0) {
            return Err(MockSpiError::Injected);
        }

        let transfer = Transfer::from_slice(data).map_err(|_| MockSpiError::TooLong)?;
        if self.transfers.is_full() {
            self.transfers.remove(0);
        }
        // Cannot fail: room was made above
        let _ = self.transfers.push(transfer);
        if let Some(left) = self.writes_left.as_mut() {
            *left -= 1;
        }
        Ok(())
    }
}
