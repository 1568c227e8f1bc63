//! State crossing the producer/consumer boundary
//!
//! Both types wrap an `embassy_sync` blocking mutex so they can live in a
//! `static` and be touched from either core. Critical sections only copy
//! bytes; neither side ever waits on the other's work.

pub mod channels;
pub mod live_config;

pub use channels::{ChannelView, SharedChannelState};
pub use live_config::{ConfigSnapshot, LiveConfig};
