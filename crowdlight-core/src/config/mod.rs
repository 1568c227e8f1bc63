//! Device configuration
//!
//! `DeviceConfig` is owned by the UI side. The producer never holds a
//! reference to it; it reads whole published copies through
//! [`crate::shared::LiveConfig`].

pub mod device;
pub mod persist;

pub use device::{
    ConfigError, DeviceConfig, FieldBounds, CHANNELS_PER_LED, DEFAULT_IP, DEFAULT_NUM_LEDS,
    DEFAULT_UNIVERSE, NUM_LEDS_BOUNDS, UNIVERSE_BOUNDS,
};
pub use persist::{decode_record, encode_record, PersistError, CONFIG_RECORD_VERSION, MAX_RECORD_SIZE};
