//! Frame encoding and decoding for the remote command link.
//!
//! Frame format:
//! - START (1 byte): 0xA5 synchronization byte
//! - LENGTH (1 byte): payload length (0-64)
//! - TOPIC (1 byte): topic identifier
//! - PAYLOAD (0-64 bytes): topic-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TOPIC, and all PAYLOAD bytes

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xA5;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// Bytes around the payload (START + LENGTH + TOPIC + CHECKSUM)
pub const FRAME_OVERHEAD: usize = 4;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + FRAME_OVERHEAD;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Topic identifier
    pub topic: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

fn checksum(length: u8, topic: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(length ^ topic, |acc, &byte| acc ^ byte)
}

impl Frame {
    /// Create a frame for `topic` carrying `payload`
    pub fn new(topic: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { topic, payload })
    }

    /// Encoded size of this frame
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + FRAME_OVERHEAD
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        let out = buffer
            .get_mut(..frame_len)
            .ok_or(FrameError::BufferTooSmall)?;

        let length = self.payload.len() as u8;
        let (header, rest) = out.split_at_mut(3);
        header.copy_from_slice(&[FRAME_START, length, self.topic]);
        let (body, tail) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        tail[0] = checksum(length, self.topic, &self.payload);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        // Payload is bounded by MAX_PAYLOAD_SIZE, so the buffer always fits
        let len = self.encode(&mut buffer).unwrap_or(0);
        Vec::from_slice(&buffer[..len]).unwrap_or_default()
    }
}

/// Parser position within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Hunting for START, anything else is discarded
    Sync,
    /// Got START
    Length,
    /// Got LENGTH
    Topic { length: u8 },
    /// Collecting payload bytes
    Payload { length: u8, topic: u8 },
    /// Payload complete, next byte is the checksum
    Checksum { length: u8, topic: u8 },
}

/// Streaming frame parser
///
/// Bytes can arrive in any split; the parser resynchronizes on the next
/// START byte after garbage or a bad frame.
#[derive(Debug, Clone)]
pub struct FrameParser {
    phase: Phase,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            phase: Phase::Sync,
            payload: Vec::new(),
        }
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.phase = Phase::Sync;
        self.payload.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        self.phase = match self.phase {
            Phase::Sync if byte == FRAME_START => Phase::Length,
            Phase::Sync => Phase::Sync,
            // START can never be a valid length, so a repeated one restarts the frame
            Phase::Length if byte == FRAME_START => Phase::Length,
            Phase::Length if byte as usize > MAX_PAYLOAD_SIZE => {
                self.reset();
                return Err(FrameError::PayloadTooLarge);
            }
            Phase::Length => Phase::Topic { length: byte },
            Phase::Topic { length } => {
                self.payload.clear();
                if length == 0 {
                    Phase::Checksum { length, topic: byte }
                } else {
                    Phase::Payload { length, topic: byte }
                }
            }
            Phase::Payload { length, topic } => {
                // Length was checked against capacity in Phase::Length
                let _ = self.payload.push(byte);
                if self.payload.len() == length as usize {
                    Phase::Checksum { length, topic }
                } else {
                    Phase::Payload { length, topic }
                }
            }
            Phase::Checksum { length, topic } => {
                let valid = byte == checksum(length, topic, &self.payload);
                let payload = core::mem::take(&mut self.payload);
                self.reset();
                if !valid {
                    return Err(FrameError::InvalidChecksum);
                }
                return Ok(Some(Frame { topic, payload }));
            }
        };
        Ok(None)
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_encode_empty_payload() {
        let frame = Frame::new(0x02, &[]).unwrap();
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&buffer[..4], &[FRAME_START, 0, 0x02, 0x02]);
    }

    #[test]
    fn test_frame_encode_with_payload() {
        let frame = Frame::new(0x01, b"Hi").unwrap();
        let encoded = frame.encode_to_vec();

        // checksum = 2 ^ 0x01 ^ 'H' ^ 'i'
        let expected_checksum = 2 ^ 0x01 ^ b'H' ^ b'i';
        assert_eq!(
            encoded.as_slice(),
            &[FRAME_START, 2, 0x01, b'H', b'i', expected_checksum]
        );
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x01, b"Hello").unwrap();
        let mut buffer = [0u8; 8];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_parser_invalid_checksum() {
        let frame = Frame::new(0x02, &[7, 0, 0, 0]).unwrap();
        let mut encoded = frame.encode_to_vec();
        let last_idx = encoded.len() - 1;
        encoded[last_idx] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(FrameError::InvalidChecksum));

        // Parser recovers for the next frame
        let good = frame.encode_to_vec();
        assert_eq!(parser.feed_bytes(&good), Ok(Some(frame)));
    }

    #[test]
    fn test_parser_resync_after_garbage() {
        let frame = Frame::new(0x01, b"ok").unwrap();
        let mut data = std::vec![0x00, 0xFF, 0x12, 0x34];
        data.extend_from_slice(&frame.encode_to_vec());

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(parsed.topic, 0x01);
        assert_eq!(parsed.payload.as_slice(), b"ok");
    }

    #[test]
    fn test_parser_resync_after_stray_start() {
        let frame = Frame::new(0x02, &7i32.to_le_bytes()).unwrap();
        let mut data = std::vec![FRAME_START];
        data.extend_from_slice(&frame.encode_to_vec());

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&data), Ok(Some(frame)));
    }

    #[test]
    fn test_parser_resync_after_repeated_start() {
        let frame = Frame::new(0x01, b"Hi").unwrap();
        let mut data = std::vec![FRAME_START, FRAME_START, FRAME_START];
        data.extend_from_slice(&frame.encode_to_vec());

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&data), Ok(Some(frame)));
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        assert_eq!(parser.feed(FRAME_START), Ok(None));
        assert_eq!(
            parser.feed(MAX_PAYLOAD_SIZE as u8 + 1),
            Err(FrameError::PayloadTooLarge)
        );
    }

    #[test]
    fn test_payload_too_large() {
        let large_payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(
            Frame::new(0x01, &large_payload),
            Err(FrameError::PayloadTooLarge)
        );
    }

    proptest! {
        #[test]
        fn prop_parser_survives_any_split(
            topic in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
            split in 0usize..MAX_FRAME_SIZE,
        ) {
            let frame = Frame::new(topic, &payload).unwrap();
            let encoded = frame.encode_to_vec();
            let split = split.min(encoded.len());

            let mut parser = FrameParser::new();
            let first = parser.feed_bytes(&encoded[..split]).unwrap();
            let parsed = match first {
                Some(parsed) => parsed,
                None => parser.feed_bytes(&encoded[split..]).unwrap().unwrap(),
            };
            prop_assert_eq!(parsed, frame);
        }
    }
}
