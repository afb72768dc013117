//! State machine definition

use super::events::ChainEvent;

/// Device-level state shared by every chip in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChainState {
    /// Power-on state: LEDs blanked, registers at reset values
    #[default]
    Shutdown,
    /// Mode registers written, still blanked
    Configured,
    /// Normal operation
    Active,
}

impl ChainState {
    /// Check if the chain is lit and accepting row data
    pub fn is_active(&self) -> bool {
        matches!(self, ChainState::Active)
    }

    /// Process an event and return the next state
    ///
    /// There is no path back to `Shutdown` once `Active` is reached.
    pub fn transition(self, event: ChainEvent) -> Self {
        match (self, event) {
            (ChainState::Shutdown, ChainEvent::Configured) => ChainState::Configured,
            (ChainState::Configured, ChainEvent::PoweredOn) => ChainState::Active,
            // A failed bring-up restarts from the beginning
            (ChainState::Configured, ChainEvent::BusFault) => ChainState::Shutdown,
            (state, _) => state,
        }
    }
}
