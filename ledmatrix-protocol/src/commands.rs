//! Remote commands carried over the command link
//!
//! Each pub-sub topic has a one-byte identifier on the wire. Payloads are
//! validated for shape here (UTF-8 text, 4-byte integer); range checks
//! such as the 0-15 intensity limit are left to the display so that a bad
//! value is ignored rather than rejected as a malformed frame.

use heapless::String;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

pub use ledmatrix_core::config::MAX_TEXT_LEN;

// A `SetText` payload of MAX_TEXT_LEN bytes must fit in one frame
const _: () = assert!(MAX_TEXT_LEN == MAX_PAYLOAD_SIZE);

// Topic IDs on the wire
const TOPIC_TEXT_SET: u8 = 0x01;
const TOPIC_INTENSITY_SET: u8 = 0x02;

/// Command topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Topic {
    /// `led-matrix/-/text/set`, string payload
    TextSet,
    /// `led-matrix/-/intensity/set`, integer payload
    IntensitySet,
}

impl Topic {
    /// All topics the display subscribes to
    pub const ALL: [Topic; 2] = [Topic::TextSet, Topic::IntensitySet];

    /// Parse a topic from its wire identifier
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            TOPIC_TEXT_SET => Some(Topic::TextSet),
            TOPIC_INTENSITY_SET => Some(Topic::IntensitySet),
            _ => None,
        }
    }

    /// Wire identifier
    pub fn id(self) -> u8 {
        match self {
            Topic::TextSet => TOPIC_TEXT_SET,
            Topic::IntensitySet => TOPIC_INTENSITY_SET,
        }
    }

    /// Parse a topic from its pub-sub name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.name() == name)
    }

    /// Pub-sub topic name
    pub fn name(self) -> &'static str {
        match self {
            Topic::TextSet => "led-matrix/-/text/set",
            Topic::IntensitySet => "led-matrix/-/intensity/set",
        }
    }
}

/// Errors when decoding a command from a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Topic identifier not known
    UnknownTopic(u8),
    /// Text payload is not valid UTF-8
    InvalidText,
    /// Integer payload is not exactly 4 bytes
    InvalidInteger,
    /// Underlying frame could not be built
    Frame(FrameError),
}

impl From<FrameError> for CommandError {
    fn from(e: FrameError) -> Self {
        CommandError::Frame(e)
    }
}

/// Commands accepted by the display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteCommand {
    /// Replace the displayed text
    SetText(String<MAX_TEXT_LEN>),
    /// Change brightness; values outside 0-15 are ignored by the display
    SetIntensity(i32),
}

impl RemoteCommand {
    /// Topic this command is published on
    pub fn topic(&self) -> Topic {
        match self {
            RemoteCommand::SetText(_) => Topic::TextSet,
            RemoteCommand::SetIntensity(_) => Topic::IntensitySet,
        }
    }

    /// Build a text command, truncating at a character boundary
    pub fn text(text: &str) -> Self {
        let mut owned = String::new();
        for ch in text.chars() {
            if owned.push(ch).is_err() {
                break;
            }
        }
        RemoteCommand::SetText(owned)
    }

    /// Parse a command from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, CommandError> {
        match Topic::from_id(frame.topic) {
            Some(Topic::TextSet) => {
                let text = core::str::from_utf8(&frame.payload)
                    .map_err(|_| CommandError::InvalidText)?;
                // Payload capacity equals MAX_TEXT_LEN, so this cannot truncate
                Ok(Self::text(text))
            }
            Some(Topic::IntensitySet) => {
                let bytes: [u8; 4] = frame
                    .payload
                    .as_slice()
                    .try_into()
                    .map_err(|_| CommandError::InvalidInteger)?;
                Ok(RemoteCommand::SetIntensity(i32::from_le_bytes(bytes)))
            }
            None => Err(CommandError::UnknownTopic(frame.topic)),
        }
    }

    /// Encode this command into a frame
    pub fn to_frame(&self) -> Result<Frame, CommandError> {
        let frame = match self {
            RemoteCommand::SetText(text) => Frame::new(Topic::TextSet.id(), text.as_bytes())?,
            RemoteCommand::SetIntensity(value) => {
                Frame::new(Topic::IntensitySet.id(), &value.to_le_bytes())?
            }
        };
        Ok(frame)
    }
}
