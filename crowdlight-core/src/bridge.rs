//! Producer data path
//!
//! One call per received datagram: validate against the live universe,
//! build the radio frame from the configured fixtures' channels, and
//! publish the channel snapshot for the console.

use crowdlight_protocol::{parse, FrameError, RadioFrame, Rejection};
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::DeviceConfig;
use crate::shared::{LiveConfig, SharedChannelState};

/// Why a datagram produced no radio frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DropReason {
    /// Validator rejected the datagram
    Rejected(Rejection),
    /// Channel data could not be framed for the radio
    Radio(FrameError),
}

impl From<Rejection> for DropReason {
    fn from(r: Rejection) -> Self {
        DropReason::Rejected(r)
    }
}

impl From<FrameError> for DropReason {
    fn from(e: FrameError) -> Self {
        DropReason::Radio(e)
    }
}

/// Running datagram counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PacketStats {
    /// Datagrams handed to the validator
    pub received: u32,
    /// Frames queued for the radio
    pub forwarded: u32,
    /// Valid traffic for another universe
    pub universe_mismatch: u32,
    /// Short, truncated, or alternate start code
    pub malformed: u32,
}

impl PacketStats {
    fn record(&mut self, result: &Result<RadioFrame, DropReason>) {
        self.received = self.received.wrapping_add(1);
        let counter = match result {
            Ok(_) => &mut self.forwarded,
            Err(DropReason::Rejected(Rejection::UniverseMismatch { .. })) => {
                &mut self.universe_mismatch
            }
            Err(_) => &mut self.malformed,
        };
        *counter = counter.wrapping_add(1);
    }
}

/// Validate-forward-publish pipeline owned by the producer task
pub struct Producer<'a, M: RawMutex> {
    channels: &'a SharedChannelState<M>,
    live: &'a LiveConfig<M>,
    stats: PacketStats,
    generation: u32,
}

impl<'a, M: RawMutex> Producer<'a, M> {
    pub fn new(channels: &'a SharedChannelState<M>, live: &'a LiveConfig<M>) -> Self {
        Self {
            channels,
            live,
            stats: PacketStats::default(),
            generation: live.snapshot().generation,
        }
    }

    /// The configuration, if one was published since the last call
    pub fn reconfigured(&mut self) -> Option<DeviceConfig> {
        let snapshot = self.live.snapshot();
        if snapshot.generation == self.generation {
            return None;
        }
        self.generation = snapshot.generation;
        Some(snapshot.config)
    }

    /// Process one datagram received at `now_ms`
    ///
    /// The configuration is copied once per call, so universe and LED count
    /// always come from the same published value. Nothing is published on
    /// rejection.
    pub fn handle(&mut self, datagram: &[u8], now_ms: u64) -> Result<RadioFrame, DropReason> {
        let result = self.process(datagram, now_ms);
        self.stats.record(&result);
        result
    }

    fn process(&self, datagram: &[u8], now_ms: u64) -> Result<RadioFrame, DropReason> {
        let config = self.live.get();
        let frame = parse(datagram, config.universe())?;

        let channels = frame.channels();
        let radio = RadioFrame::encode(&channels[..config.forward_len(channels.len())])?;

        self.channels.publish(channels, now_ms);
        Ok(radio)
    }

    pub fn stats(&self) -> PacketStats {
        self.stats
    }

    /// Return the counters and start a new period
    pub fn take_stats(&mut self) -> PacketStats {
        core::mem::take(&mut self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use crowdlight_protocol::e131::{
        E131_HEADER_SIZE, PROPERTY_COUNT_OFFSET, START_CODE_OFFSET, UNIVERSE_OFFSET,
    };
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use heapless::Vec;

    fn datagram(universe: u16, channels: &[u8]) -> Vec<u8, 638> {
        let mut packet = Vec::new();
        packet.resize(E131_HEADER_SIZE, 0).unwrap();
        packet[UNIVERSE_OFFSET..UNIVERSE_OFFSET + 2].copy_from_slice(&universe.to_be_bytes());
        let count = (channels.len() + 1) as u16;
        packet[PROPERTY_COUNT_OFFSET..PROPERTY_COUNT_OFFSET + 2]
            .copy_from_slice(&count.to_be_bytes());
        packet.extend_from_slice(channels).unwrap();
        packet
    }

    #[test]
    fn test_forwards_configured_fixtures() {
        let channels = SharedChannelState::<NoopRawMutex>::new();
        let live = LiveConfig::<NoopRawMutex>::new(DeviceConfig::DEFAULT);
        let mut producer = Producer::new(&channels, &live);

        let data: [u8; 64] = core::array::from_fn(|i| i as u8);
        let frame = producer.handle(&datagram(129, &data), 10).unwrap();
        assert_eq!(frame.payload(), &data[..30]);

        let view = channels.consume();
        assert!(view.has_update);
        assert_eq!(view.data.as_slice(), &data);
        assert_eq!(view.received_at_ms, Some(10));
    }

    #[test]
    fn test_short_frame_forwards_what_exists() {
        let channels = SharedChannelState::<NoopRawMutex>::new();
        let live = LiveConfig::<NoopRawMutex>::new(DeviceConfig::DEFAULT);
        let mut producer = Producer::new(&channels, &live);

        let frame = producer.handle(&datagram(129, &[1, 2, 3, 4]), 0).unwrap();
        assert_eq!(frame.payload(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_rejection_publishes_nothing() {
        let channels = SharedChannelState::<NoopRawMutex>::new();
        let live = LiveConfig::<NoopRawMutex>::new(DeviceConfig::DEFAULT);
        let mut producer = Producer::new(&channels, &live);

        let mut bad_start = datagram(129, &[1, 2, 3]);
        bad_start[START_CODE_OFFSET] = 0xCC;

        assert_eq!(
            producer.handle(&datagram(5, &[1, 2, 3]), 0),
            Err(DropReason::Rejected(Rejection::UniverseMismatch { found: 5 }))
        );
        assert_eq!(
            producer.handle(&bad_start, 0),
            Err(DropReason::Rejected(Rejection::BadStartCode(0xCC)))
        );
        assert_eq!(
            producer.handle(&[0u8; 10], 0),
            Err(DropReason::Rejected(Rejection::TooSmall))
        );
        let view = channels.consume();
        assert!(!view.has_update);
        assert_eq!(view.received_at_ms, None);

        let stats = producer.stats();
        assert_eq!(stats.received, 3);
        assert_eq!(stats.forwarded, 0);
        assert_eq!(stats.universe_mismatch, 1);
        assert_eq!(stats.malformed, 2);
    }

    #[test]
    fn test_live_universe_change() {
        let channels = SharedChannelState::<NoopRawMutex>::new();
        let live = LiveConfig::<NoopRawMutex>::new(DeviceConfig::DEFAULT);
        let mut producer = Producer::new(&channels, &live);

        let packet = datagram(42, &[9; 6]);
        assert!(producer.handle(&packet, 0).is_err());

        let mut next = DeviceConfig::DEFAULT;
        next.set_universe(42);
        live.publish(next);
        assert!(producer.handle(&packet, 1).is_ok());
    }

    #[test]
    fn test_reconfigured_reports_each_publish_once() {
        let channels = SharedChannelState::<NoopRawMutex>::new();
        let live = LiveConfig::<NoopRawMutex>::new(DeviceConfig::DEFAULT);
        live.publish(DeviceConfig::DEFAULT);
        let mut producer = Producer::new(&channels, &live);

        // The value present at construction is not a change
        assert_eq!(producer.reconfigured(), None);

        let mut next = DeviceConfig::DEFAULT;
        next.set_num_leds(40);
        live.publish(next);
        assert_eq!(producer.reconfigured(), Some(next));
        assert_eq!(producer.reconfigured(), None);

        // Publishing an identical value is still a new generation
        live.publish(next);
        assert_eq!(producer.reconfigured(), Some(next));
    }

    #[test]
    fn test_take_stats_resets() {
        let channels = SharedChannelState::<NoopRawMutex>::new();
        let live = LiveConfig::<NoopRawMutex>::new(DeviceConfig::DEFAULT);
        let mut producer = Producer::new(&channels, &live);

        producer.handle(&datagram(129, &[1]), 0).unwrap();
        assert_eq!(producer.take_stats().forwarded, 1);
        assert_eq!(producer.stats(), PacketStats::default());
    }
}
