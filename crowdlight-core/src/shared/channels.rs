//! Latest-wins channel snapshot handed from the producer to the console

use core::cell::RefCell;

use crowdlight_protocol::DMX_MAX_CHANNELS;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;

use crate::status::LinkReport;

struct Region {
    data: [u8; DMX_MAX_CHANNELS],
    len: usize,
    received_at_ms: Option<u64>,
    unseen: bool,
    link: LinkReport,
}

impl Region {
    const fn new() -> Self {
        Self {
            data: [0; DMX_MAX_CHANNELS],
            len: 0,
            received_at_ms: None,
            unseen: false,
            link: LinkReport::DOWN,
        }
    }
}

/// What the consumer saw in one [`SharedChannelState::consume`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelView {
    /// A publish happened since the previous consume
    pub has_update: bool,
    /// Channel bytes of the latest snapshot
    pub data: Vec<u8, DMX_MAX_CHANNELS>,
    /// When the latest snapshot was published
    pub received_at_ms: Option<u64>,
}

impl ChannelView {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Channel snapshot, last-frame timestamp, and link report
///
/// `publish` and `set_link` are producer-only; `consume` is consumer-only.
/// Each call is a single short critical section, so a reader observes the
/// data, length, timestamp and flag of exactly one publish.
pub struct SharedChannelState<M: RawMutex> {
    inner: Mutex<M, RefCell<Region>>,
}

impl<M: RawMutex> SharedChannelState<M> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Region::new())),
        }
    }

    /// Replace the snapshot wholesale and mark it unseen
    ///
    /// Input longer than a universe is cut at [`DMX_MAX_CHANNELS`].
    pub fn publish(&self, channels: &[u8], now_ms: u64) {
        let len = channels.len().min(DMX_MAX_CHANNELS);
        self.inner.lock(|cell| {
            let mut region = cell.borrow_mut();
            region.data[..len].copy_from_slice(&channels[..len]);
            region.len = len;
            region.received_at_ms = Some(now_ms);
            region.unseen = true;
        });
    }

    /// Copy out the snapshot and clear the unseen flag in the same section
    pub fn consume(&self) -> ChannelView {
        self.inner.lock(|cell| {
            let mut region = cell.borrow_mut();
            let has_update = region.unseen;
            region.unseen = false;

            let mut data = Vec::new();
            // len never exceeds capacity
            let _ = data.extend_from_slice(&region.data[..region.len]);

            ChannelView {
                has_update,
                data,
                received_at_ms: region.received_at_ms,
            }
        })
    }

    /// Record the current Ethernet link state
    pub fn set_link(&self, link: LinkReport) {
        self.inner.lock(|cell| cell.borrow_mut().link = link);
    }

    pub fn link(&self) -> LinkReport {
        self.inner.lock(|cell| cell.borrow().link)
    }
}

impl<M: RawMutex> Default for SharedChannelState<M> {
    fn default() -> Self {
        Self::new()
    }
}
