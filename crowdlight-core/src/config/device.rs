//! Device configuration type and field bounds

use serde::{Deserialize, Serialize};

/// DMX channels consumed by one RGB fixture
pub const CHANNELS_PER_LED: usize = 3;

/// Universe used when nothing is stored
pub const DEFAULT_UNIVERSE: u16 = 129;

/// LED count used when nothing is stored
pub const DEFAULT_NUM_LEDS: u16 = 10;

/// Static address used when nothing is stored (192.168.0.100)
pub const DEFAULT_IP: [u8; 4] = [192, 168, 0, 100];

/// Valid universe range
pub const UNIVERSE_BOUNDS: FieldBounds = FieldBounds::new(1, 63999);

/// Valid LED count range
pub const NUM_LEDS_BOUNDS: FieldBounds = FieldBounds::new(0, 50);

/// Inclusive range of an editable numeric field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FieldBounds {
    pub min: u16,
    pub max: u16,
}

impl FieldBounds {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u16) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: u16) -> u16 {
        value.clamp(self.min, self.max)
    }

    /// Move `value` by `delta`, saturating at the bounds
    pub fn step(&self, value: u16, delta: i32) -> u16 {
        let moved = (i32::from(value) + delta).clamp(i32::from(self.min), i32::from(self.max));
        moved as u16
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Universe outside 1..=63999
    UniverseOutOfRange(u16),
    /// LED count outside 0..=50
    LedCountOutOfRange(u16),
}

/// Persisted, user-editable device settings
///
/// Setters clamp to the field bounds. Records decoded from flash go
/// through [`DeviceConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// E1.31 universe to listen on
    universe: u16,
    /// RGB fixtures driven over the radio link
    num_leds: u16,
    /// Static IPv4 address, octets in network order
    ip_address: u32,
    /// Use DHCP instead of `ip_address`
    use_dhcp: bool,
}

impl DeviceConfig {
    /// Factory defaults
    pub const DEFAULT: Self = Self {
        universe: DEFAULT_UNIVERSE,
        num_leds: DEFAULT_NUM_LEDS,
        ip_address: u32::from_be_bytes(DEFAULT_IP),
        use_dhcp: false,
    };

    pub fn universe(&self) -> u16 {
        self.universe
    }

    pub fn num_leds(&self) -> u16 {
        self.num_leds
    }

    pub fn use_dhcp(&self) -> bool {
        self.use_dhcp
    }

    /// Static address as octets
    pub fn ip_octets(&self) -> [u8; 4] {
        self.ip_address.to_be_bytes()
    }

    pub fn set_use_dhcp(&mut self, use_dhcp: bool) {
        self.use_dhcp = use_dhcp;
    }

    /// Set the universe, clamped to its bounds
    pub fn set_universe(&mut self, universe: u16) {
        self.universe = UNIVERSE_BOUNDS.clamp(universe);
    }

    /// Set the LED count, clamped to its bounds
    pub fn set_num_leds(&mut self, num_leds: u16) {
        self.num_leds = NUM_LEDS_BOUNDS.clamp(num_leds);
    }

    /// Channel bytes the configured fixtures consume
    pub fn bytes_to_forward(&self) -> usize {
        CHANNELS_PER_LED * self.num_leds as usize
    }

    /// Bytes to send over the radio for a frame of `available` channels
    pub fn forward_len(&self, available: usize) -> usize {
        self.bytes_to_forward().min(available)
    }

    /// Check every field against its bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !UNIVERSE_BOUNDS.contains(self.universe) {
            return Err(ConfigError::UniverseOutOfRange(self.universe));
        }
        if !NUM_LEDS_BOUNDS.contains(self.num_leds) {
            return Err(ConfigError::LedCountOutOfRange(self.num_leds));
        }
        Ok(())
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
