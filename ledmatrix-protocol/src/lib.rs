//! LED Matrix Remote Command Protocol
//!
//! Remote control reaches the display as two pub-sub topics:
//!
//! - `led-matrix/-/text/set` (string payload) - replace the shown text
//! - `led-matrix/-/intensity/set` (integer payload) - change brightness
//!
//! The radio gateway forwards them over a UART link as binary frames:
//! ```text
//! ┌───────┬────────┬───────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TOPIC │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B    │ 0–64B       │ 1B       │
//! └───────┴────────┴───────┴─────────────┴──────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod commands;
pub mod frame;

pub use commands::{CommandError, RemoteCommand, Topic, MAX_TEXT_LEN};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
