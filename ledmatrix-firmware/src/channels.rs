//! Inter-task communication channels
//!
//! Uses embassy-sync primitives for async communication between tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use ledmatrix_protocol::RemoteCommand;

/// Channel capacity for remote commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Decoded remote commands, consumed one at a time by the display task
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, RemoteCommand, COMMAND_CHANNEL_SIZE> =
    Channel::new();
