//! Events that trigger chain state transitions

/// Events produced while bringing up the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChainEvent {
    /// Decode mode, test mode and scan limit written to every device
    Configured,
    /// Shutdown register cleared on every device
    PoweredOn,
    /// A bus transfer failed
    BusFault,
}
