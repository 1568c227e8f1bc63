//! Radio link framing for the HC-12 serial transport.
//!
//! Frame format:
//! - MARKER (1 byte): 0xAA
//! - LENGTH (1 byte): payload length (0-255)
//! - PAYLOAD (LENGTH bytes): channel data
//! - CHECKSUM (1 byte): XOR of MARKER and all PAYLOAD bytes
//!
//! The checksum only catches bit corruption on the lossy link. There is no
//! acknowledgement or retransmission; a bad frame is simply dropped.

use heapless::Vec;

/// Frame start marker
pub const FRAME_MARKER: u8 = 0xAA;

/// Maximum payload size in bytes (single-byte length field)
pub const MAX_PAYLOAD_SIZE: usize = 255;

/// Bytes added around the payload (MARKER + LENGTH + CHECKSUM)
pub const FRAME_OVERHEAD: usize = 3;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + FRAME_OVERHEAD;

/// Errors that can occur during frame encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds the single-byte length field
    PayloadTooLarge,
    /// First byte is not the frame marker
    BadMarker,
    /// Fewer bytes than the length field announces
    Truncated,
    /// Checksum does not match the received bytes
    ChecksumMismatch,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// One radio frame payload, ready to be serialized
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioFrame {
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl RadioFrame {
    /// Create a frame carrying `payload`
    ///
    /// Payloads longer than 255 bytes are rejected, never truncated.
    pub fn encode(payload: &[u8]) -> Result<Self, FrameError> {
        let mut bytes = Vec::new();
        bytes
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { payload: bytes })
    }

    /// Payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Checksum that will be sent for this frame
    pub fn checksum(&self) -> u8 {
        checksum(FRAME_MARKER, &self.payload)
    }

    /// Size of the serialized frame
    pub fn wire_len(&self) -> usize {
        self.payload.len() + FRAME_OVERHEAD
    }

    /// Serialize into `buffer`
    ///
    /// Returns the number of bytes written
    pub fn write_to(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.wire_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let len = self.payload.len();
        buffer[0] = FRAME_MARKER;
        buffer[1] = len as u8;
        buffer[2..2 + len].copy_from_slice(&self.payload);
        buffer[2 + len] = self.checksum();

        Ok(frame_len)
    }

    /// Serialize into a heapless Vec
    pub fn to_bytes(&self) -> Vec<u8, MAX_FRAME_SIZE> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        // MAX_FRAME_SIZE always fits a frame
        let len = self.write_to(&mut buffer).unwrap_or(0);
        let mut vec = Vec::new();
        let _ = vec.extend_from_slice(&buffer[..len]);
        vec
    }
}

/// XOR fold of `marker` and every payload byte
fn checksum(marker: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(marker, |acc, &byte| acc ^ byte)
}

/// Decode one frame from the start of `bytes`
///
/// Returns the frame and the number of bytes consumed. The checksum is
/// verified over the bytes as received (marker included) before the marker
/// value itself is judged, so any single flipped bit in the marker or
/// payload reads as [`FrameError::ChecksumMismatch`].
pub fn decode(bytes: &[u8]) -> Result<(RadioFrame, usize), FrameError> {
    if bytes.len() < 2 {
        return Err(FrameError::Truncated);
    }

    let marker = bytes[0];
    let len = bytes[1] as usize;
    let frame_len = len + FRAME_OVERHEAD;
    if bytes.len() < frame_len {
        return Err(FrameError::Truncated);
    }

    let payload = &bytes[2..2 + len];
    if bytes[2 + len] != checksum(marker, payload) {
        return Err(FrameError::ChecksumMismatch);
    }
    if marker != FRAME_MARKER {
        return Err(FrameError::BadMarker);
    }

    Ok((RadioFrame::encode(payload)?, frame_len))
}

/// State machine for parsing frames from a byte stream
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    expected_length: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for MARKER byte
    WaitingForMarker,
    /// Got MARKER, waiting for LENGTH
    WaitingForLength,
    /// Reading payload bytes
    ReadingPayload,
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
            state: ParseState::WaitingForMarker,
            buffer: Vec::new(),
            expected_length: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForMarker;
        self.buffer.clear();
        self.expected_length = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on checksum failure.
    pub fn feed(&mut self, byte: u8) -> Result<Option<RadioFrame>, FrameError> {
        match self.state {
            ParseState::WaitingForMarker => {
                if byte == FRAME_MARKER {
                    self.state = ParseState::WaitingForLength;
                }
                Ok(None)
            }
            ParseState::WaitingForLength => {
                self.expected_length = byte;
                self.buffer.clear();
                self.state = if byte == 0 {
                    ParseState::WaitingForChecksum
                } else {
                    ParseState::ReadingPayload
                };
                Ok(None)
            }
            ParseState::ReadingPayload => {
                // Length is a u8, so the buffer cannot overflow
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::WaitingForChecksum;
                }
                Ok(None)
            }
            ParseState::WaitingForChecksum => {
                let expected = checksum(FRAME_MARKER, &self.buffer);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::ChecksumMismatch);
                }

                let frame = RadioFrame {
                    payload: self.buffer.clone(),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<RadioFrame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
