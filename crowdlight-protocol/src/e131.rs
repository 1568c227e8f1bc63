//! E1.31 (sACN) data packet validation
//!
//! Only the fields the transmitter acts on are inspected:
//!
//! ```text
//! offset  size  field
//! 113     2     universe (big-endian)
//! 123     2     DMP property value count (start code + channels, big-endian)
//! 125     1     DMX start code
//! 126     n     channel data (n <= 512)
//! ```
//!
//! Everything before offset 113 (root and framing layer headers) is carried
//! but not checked.

use heapless::Vec;

/// UDP port E1.31 sources send to
pub const E131_PORT: u16 = 5568;

/// Bytes preceding channel data (root + framing + DMP layer headers)
pub const E131_HEADER_SIZE: usize = 126;

/// Maximum DMX channels in one universe
pub const DMX_MAX_CHANNELS: usize = 512;

/// Largest datagram worth receiving
pub const E131_MAX_PACKET_SIZE: usize = E131_HEADER_SIZE + DMX_MAX_CHANNELS;

/// Offset of the big-endian universe field in the framing layer
pub const UNIVERSE_OFFSET: usize = 113;

/// Offset of the big-endian property value count in the DMP layer
pub const PROPERTY_COUNT_OFFSET: usize = 123;

/// Offset of the DMX start code (last header byte)
pub const START_CODE_OFFSET: usize = 125;

/// Start code of standard (dimmer) DMX data
pub const DMX_NULL_START_CODE: u8 = 0x00;

/// Reasons a datagram is not forwarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rejection {
    /// Shorter than the fixed header
    TooSmall,
    /// Well-formed, but addressed to another universe
    UniverseMismatch { found: u16 },
    /// Alternate start code (RDM, text, SIP, ...)
    BadStartCode(u8),
    /// Declared channel count is zero or exceeds the bytes actually received
    Malformed,
}

impl Rejection {
    /// Returns true for traffic that is normal on a shared lighting network
    pub fn is_expected(&self) -> bool {
        matches!(self, Rejection::UniverseMismatch { .. })
    }
}

/// Channel data of a datagram that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValidatedFrame {
    /// Universe the frame was addressed to
    pub universe: u16,
    /// DMX channel values, channel 1 first
    pub channels: Vec<u8, DMX_MAX_CHANNELS>,
}

impl ValidatedFrame {
    /// Number of channels carried
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// True when the source sent a start code with no channels
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Channel values as a slice
    pub fn channels(&self) -> &[u8] {
        &self.channels
    }
}

/// Validate a received datagram and extract its channel data
///
/// Checks run cheapest-first and the first failure wins. The declared
/// property count is never trusted: channel bytes are only copied when the
/// datagram actually contains them.
pub fn parse(datagram: &[u8], expected_universe: u16) -> Result<ValidatedFrame, Rejection> {
    if datagram.len() < E131_HEADER_SIZE {
        return Err(Rejection::TooSmall);
    }

    let universe = read_u16_be(datagram, UNIVERSE_OFFSET);
    if universe != expected_universe {
        return Err(Rejection::UniverseMismatch { found: universe });
    }

    let start_code = datagram[START_CODE_OFFSET];
    if start_code != DMX_NULL_START_CODE {
        return Err(Rejection::BadStartCode(start_code));
    }

    // Property count includes the start code byte
    let property_count = read_u16_be(datagram, PROPERTY_COUNT_OFFSET) as usize;
    if property_count == 0 {
        return Err(Rejection::Malformed);
    }
    let channel_count = (property_count - 1).min(DMX_MAX_CHANNELS);

    let available = &datagram[E131_HEADER_SIZE..];
    if channel_count > available.len() {
        return Err(Rejection::Malformed);
    }

    let mut channels = Vec::new();
    channels
        .extend_from_slice(&available[..channel_count])
        .map_err(|_| Rejection::Malformed)?;

    Ok(ValidatedFrame { universe, channels })
}

fn read_u16_be(bytes: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a data packet with the given universe and channels
    fn datagram(universe: u16, channels: &[u8]) -> Vec<u8, E131_MAX_PACKET_SIZE> {
        let mut packet = Vec::new();
        packet.resize(E131_HEADER_SIZE, 0).unwrap();
        packet[UNIVERSE_OFFSET..UNIVERSE_OFFSET + 2].copy_from_slice(&universe.to_be_bytes());
        let count = (channels.len() + 1) as u16;
        packet[PROPERTY_COUNT_OFFSET..PROPERTY_COUNT_OFFSET + 2]
            .copy_from_slice(&count.to_be_bytes());
        packet[START_CODE_OFFSET] = DMX_NULL_START_CODE;
        packet.extend_from_slice(channels).unwrap();
        packet
    }

    #[test]
    fn test_parse_universe_129_with_ten_channels() {
        let channels = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];
        let packet = datagram(129, &channels);
        assert_eq!(packet[UNIVERSE_OFFSET], 0x00);
        assert_eq!(packet[UNIVERSE_OFFSET + 1], 0x81);
        assert_eq!(packet[PROPERTY_COUNT_OFFSET + 1], 11);

        let frame = parse(&packet, 129).unwrap();
        assert_eq!(frame.universe, 129);
        assert_eq!(frame.channels(), &channels);
    }

    #[test]
    fn test_header_only_is_too_small() {
        let packet = datagram(1, &[]);
        assert_eq!(parse(&packet[..E131_HEADER_SIZE - 1], 1), Err(Rejection::TooSmall));
        assert_eq!(parse(&[], 1), Err(Rejection::TooSmall));
    }

    #[test]
    fn test_universe_checked_before_start_code() {
        let mut packet = datagram(7, &[1, 2, 3]);
        packet[START_CODE_OFFSET] = 0xCC;
        assert_eq!(
            parse(&packet, 8),
            Err(Rejection::UniverseMismatch { found: 7 })
        );
        assert_eq!(parse(&packet, 7), Err(Rejection::BadStartCode(0xCC)));
    }

    #[test]
    fn test_declared_length_beyond_datagram_is_malformed() {
        let mut packet = datagram(1, &[1, 2, 3]);
        packet[PROPERTY_COUNT_OFFSET..PROPERTY_COUNT_OFFSET + 2]
            .copy_from_slice(&100u16.to_be_bytes());
        assert_eq!(parse(&packet, 1), Err(Rejection::Malformed));
    }

    #[test]
    fn test_zero_property_count_is_malformed() {
        let mut packet = datagram(1, &[1, 2, 3]);
        packet[PROPERTY_COUNT_OFFSET..PROPERTY_COUNT_OFFSET + 2].copy_from_slice(&[0, 0]);
        assert_eq!(parse(&packet, 1), Err(Rejection::Malformed));
    }

    #[test]
    fn test_channel_count_capped_at_512() {
        let channels = [0x5Au8; DMX_MAX_CHANNELS];
        let mut packet = datagram(3, &channels);
        packet[PROPERTY_COUNT_OFFSET..PROPERTY_COUNT_OFFSET + 2]
            .copy_from_slice(&0xFFFFu16.to_be_bytes());

        let frame = parse(&packet, 3).unwrap();
        assert_eq!(frame.len(), DMX_MAX_CHANNELS);
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let mut packet = datagram(2, &[9, 8, 7, 6]);
        packet[PROPERTY_COUNT_OFFSET..PROPERTY_COUNT_OFFSET + 2]
            .copy_from_slice(&3u16.to_be_bytes());

        let frame = parse(&packet, 2).unwrap();
        assert_eq!(frame.channels(), &[9, 8]);
    }

    #[test]
    fn test_start_code_only_yields_empty_frame() {
        let packet = datagram(129, &[]);
        let frame = parse(&packet, 129).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_expected_rejections() {
        assert!(Rejection::UniverseMismatch { found: 4 }.is_expected());
        assert!(!Rejection::TooSmall.is_expected());
        assert!(!Rejection::BadStartCode(0x17).is_expected());
        assert!(!Rejection::Malformed.is_expected());
    }
}
