//! Chain power state machine
//!
//! Tracks whether the chained driver chips are still in their power-on
//! shutdown state or have been configured and switched on.

pub mod events;
pub mod machine;

pub use events::ChainEvent;
pub use machine::ChainState;
