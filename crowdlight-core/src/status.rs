//! Link and activity status shown on the display

/// A frame newer than this counts as live traffic
pub const ACTIVE_WINDOW_MS: u64 = 1000;

/// Ethernet link state as last reported by the producer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkReport {
    /// PHY link is up
    pub up: bool,
    /// Address currently bound (static or DHCP lease)
    pub ip: Option<[u8; 4]>,
}

impl LinkReport {
    pub const DOWN: Self = Self { up: false, ip: None };
}

/// Summary of the data path for the status pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Ethernet link down
    Down,
    /// Link up, no frame for our universe yet
    ConnectedNoData,
    /// Frames were received, but not recently
    Idle,
    /// Frame received within [`ACTIVE_WINDOW_MS`]
    Active,
}

impl LinkStatus {
    /// Classify from link state and the timestamp of the last accepted frame
    pub fn evaluate(link_up: bool, last_received_ms: Option<u64>, now_ms: u64) -> Self {
        if !link_up {
            return LinkStatus::Down;
        }
        match last_received_ms {
            None => LinkStatus::ConnectedNoData,
            Some(at) if now_ms.saturating_sub(at) < ACTIVE_WINDOW_MS => LinkStatus::Active,
            Some(_) => LinkStatus::Idle,
        }
    }

    /// Short text for the display
    pub fn label(&self) -> &'static str {
        match self {
            LinkStatus::Down => "LINK DOWN",
            LinkStatus::ConnectedNoData => "NO SIGNAL",
            LinkStatus::Idle => "IDLE",
            LinkStatus::Active => "RECEIVING",
        }
    }

    pub fn has_data(&self) -> bool {
        matches!(self, LinkStatus::Active | LinkStatus::Idle)
    }
}
