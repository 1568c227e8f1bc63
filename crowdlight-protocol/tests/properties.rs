//! Property tests for the E1.31 validator and the radio framer

use crowdlight_protocol::e131::{
    E131_HEADER_SIZE, PROPERTY_COUNT_OFFSET, START_CODE_OFFSET, UNIVERSE_OFFSET,
};
use crowdlight_protocol::{decode, parse, FrameError, RadioFrame, Rejection, MAX_PAYLOAD_SIZE};
use proptest::prelude::*;

fn datagram(universe: u16, channels: &[u8]) -> Vec<u8> {
    let mut packet = vec![0u8; E131_HEADER_SIZE];
    packet[UNIVERSE_OFFSET..UNIVERSE_OFFSET + 2].copy_from_slice(&universe.to_be_bytes());
    let count = (channels.len() + 1) as u16;
    packet[PROPERTY_COUNT_OFFSET..PROPERTY_COUNT_OFFSET + 2].copy_from_slice(&count.to_be_bytes());
    packet[START_CODE_OFFSET] = 0;
    packet.extend_from_slice(channels);
    packet
}

proptest! {
    #[test]
    fn short_datagrams_are_too_small(
        bytes in proptest::collection::vec(any::<u8>(), 0..E131_HEADER_SIZE),
        universe in any::<u16>(),
    ) {
        prop_assert_eq!(parse(&bytes, universe), Err(Rejection::TooSmall));
    }

    #[test]
    fn foreign_universes_are_rejected(
        universe in 1u16..=63999,
        expected in 1u16..=63999,
        channels in proptest::collection::vec(any::<u8>(), 0..=512),
    ) {
        prop_assume!(universe != expected);
        let packet = datagram(universe, &channels);
        prop_assert_eq!(
            parse(&packet, expected),
            Err(Rejection::UniverseMismatch { found: universe })
        );
    }

    #[test]
    fn matching_frames_carry_their_channels(
        universe in 1u16..=63999,
        channels in proptest::collection::vec(any::<u8>(), 0..=512),
    ) {
        let packet = datagram(universe, &channels);
        let frame = parse(&packet, universe).unwrap();
        prop_assert_eq!(frame.universe, universe);
        prop_assert_eq!(frame.channels(), channels.as_slice());
    }

    #[test]
    fn arbitrary_datagrams_never_panic(
        bytes in proptest::collection::vec(any::<u8>(), 0..700),
        universe in any::<u16>(),
    ) {
        if let Ok(frame) = parse(&bytes, universe) {
            prop_assert!(frame.len() <= bytes.len() - E131_HEADER_SIZE);
        }
    }

    #[test]
    fn radio_frames_roundtrip(payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE)) {
        let bytes = RadioFrame::encode(&payload).unwrap().to_bytes();
        let (frame, consumed) = decode(&bytes).unwrap();
        prop_assert_eq!(frame.payload(), payload.as_slice());
        prop_assert_eq!(consumed, bytes.len());
    }

    #[test]
    fn oversized_payloads_are_rejected(len in (MAX_PAYLOAD_SIZE + 1)..1024usize) {
        let payload = vec![0u8; len];
        prop_assert_eq!(RadioFrame::encode(&payload), Err(FrameError::PayloadTooLarge));
    }

    #[test]
    fn single_bit_flips_fail_the_checksum(
        payload in proptest::collection::vec(any::<u8>(), 1..=MAX_PAYLOAD_SIZE),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut bytes = RadioFrame::encode(&payload).unwrap().to_bytes();
        // Marker (index 0) or any payload byte; the length byte and checksum are excluded
        let mut index = position.index(payload.len() + 1);
        if index > 0 {
            index += 1;
        }
        bytes[index] ^= 1 << bit;
        prop_assert_eq!(decode(&bytes).map(|_| ()), Err(FrameError::ChecksumMismatch));
    }
}
