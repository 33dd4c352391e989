//! Byte framing for UART-attached IR transceivers.
//!
//! Frame format:
//! - START (1 byte): 0xA5 synchronization byte
//! - WORD (4 bytes): packet word, big-endian
//! - CHECKSUM (1 byte): XOR of the four WORD bytes

use heapless::Vec;

use crate::packet::{IrPacket, PacketError};

/// Frame synchronization byte
pub const FRAME_START: u8 = 0xA5;

/// Packet word size in bytes
const WORD_LEN: usize = 4;

/// Complete frame size (START + WORD + CHECKSUM)
pub const FRAME_LEN: usize = 1 + WORD_LEN + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Checksum mismatch
    InvalidChecksum,
    /// Checksum matched but the word is not a valid packet
    InvalidPacket(PacketError),
    /// Buffer too small for encoding
    BufferTooSmall,
}

fn checksum(word: &[u8]) -> u8 {
    word.iter().fold(0, |acc, b| acc ^ b)
}

/// Encode a packet into `buffer`
///
/// Returns the number of bytes written
pub fn encode_frame(packet: &IrPacket, buffer: &mut [u8]) -> Result<usize, FrameError> {
    if buffer.len() < FRAME_LEN {
        return Err(FrameError::BufferTooSmall);
    }

    let word = packet.to_word().to_be_bytes();
    buffer[0] = FRAME_START;
    buffer[1..1 + WORD_LEN].copy_from_slice(&word);
    buffer[1 + WORD_LEN] = checksum(&word);

    Ok(FRAME_LEN)
}

/// State machine for parsing incoming frames
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, WORD_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for START byte
    WaitingForStart,
    /// Reading the packet word
    ReadingWord,
    /// Waiting for CHECKSUM
    WaitingForChecksum,
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
            state: ParseState::WaitingForStart,
            buffer: Vec::new(),
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart;
        self.buffer.clear();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(packet))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<IrPacket>, FrameError> {
        match self.state {
            ParseState::WaitingForStart => {
                if byte == FRAME_START {
                    self.buffer.clear();
                    self.state = ParseState::ReadingWord;
                }
                // Line noise between frames is expected on IR
                Ok(None)
            }
            ParseState::ReadingWord => {
                // Cannot overflow, state changes once the word is full
                let _ = self.buffer.push(byte);
                if self.buffer.len() == WORD_LEN {
                    self.state = ParseState::WaitingForChecksum;
                }
                Ok(None)
            }
            ParseState::WaitingForChecksum => {
                let expected = checksum(&self.buffer);
                let mut word = [0u8; WORD_LEN];
                word.copy_from_slice(&self.buffer);
                self.reset();

                if byte != expected {
                    return Err(FrameError::InvalidChecksum);
                }

                IrPacket::from_word(u32::from_be_bytes(word))
                    .map(Some)
                    .map_err(FrameError::InvalidPacket)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete packet found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<IrPacket>, FrameError> {
        for &byte in bytes {
            if let Some(packet) = self.feed(byte)? {
                return Ok(Some(packet));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::{BeaconPayload, BROADCAST_ID, GAME_ADDRESS};

    fn beacon(creature: u16) -> IrPacket {
        IrPacket::new(
            GAME_ADDRESS,
            BROADCAST_ID,
            BeaconPayload::xmit_monster(creature).encode(),
        )
    }

    #[test]
    fn test_encode_layout() {
        let packet = beacon(7);
        let mut buffer = [0u8; FRAME_LEN];
        let len = encode_frame(&packet, &mut buffer).unwrap();

        assert_eq!(len, FRAME_LEN);
        assert_eq!(buffer[0], FRAME_START);
        assert_eq!(&buffer[1..5], &packet.to_word().to_be_bytes());
        assert_eq!(buffer[5], buffer[1] ^ buffer[2] ^ buffer[3] ^ buffer[4]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buffer = [0u8; 3];
        assert_eq!(
            encode_frame(&beacon(1), &mut buffer),
            Err(FrameError::BufferTooSmall)
        );
    }

    #[test]
    fn test_parser_invalid_checksum() {
        let mut buffer = [0u8; FRAME_LEN];
        encode_frame(&beacon(3), &mut buffer).unwrap();
        buffer[FRAME_LEN - 1] ^= 0xFF;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&buffer), Err(FrameError::InvalidChecksum));
    }

    #[test]
    fn test_parser_resync_after_garbage() {
        let packet = beacon(12);
        let mut data = [0u8; 3 + FRAME_LEN];
        data[..3].copy_from_slice(&[0x00, 0xFF, 0x12]);
        encode_frame(&packet, &mut data[3..]).unwrap();

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&data), Ok(Some(packet)));
    }

    #[test]
    fn test_parser_recovers_after_error() {
        let mut bad = [0u8; FRAME_LEN];
        encode_frame(&beacon(1), &mut bad).unwrap();
        bad[2] ^= 0x01;

        let mut parser = FrameParser::new();
        assert!(parser.feed_bytes(&bad).is_err());

        let mut good = [0u8; FRAME_LEN];
        encode_frame(&beacon(2), &mut good).unwrap();
        assert_eq!(parser.feed_bytes(&good), Ok(Some(beacon(2))));
    }

    #[test]
    fn test_parser_rejects_word_without_start_bit() {
        let word = [0x00, 0x00, 0x10, 0x01];
        let frame = [FRAME_START, word[0], word[1], word[2], word[3], checksum(&word)];

        let mut parser = FrameParser::new();
        assert_eq!(
            parser.feed_bytes(&frame),
            Err(FrameError::InvalidPacket(PacketError::Malformed))
        );
    }
}
