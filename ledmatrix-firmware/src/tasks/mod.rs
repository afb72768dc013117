//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod display;
pub mod remote_rx;

pub use display::{display_task, Chain, Display};
pub use remote_rx::remote_rx_task;
