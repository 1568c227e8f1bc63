//! Whole-value configuration cell read by the producer

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::config::DeviceConfig;

/// A published configuration and its generation number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigSnapshot {
    pub config: DeviceConfig,
    /// Incremented on every publish; 0 is the boot value
    pub generation: u32,
}

/// Configuration shared with the producer
///
/// The console builds a new [`DeviceConfig`] and replaces the cell's value;
/// the producer copies the whole value out. No field is ever read or written
/// on its own across the boundary.
pub struct LiveConfig<M: RawMutex> {
    inner: Mutex<M, Cell<ConfigSnapshot>>,
}

impl<M: RawMutex> LiveConfig<M> {
    pub const fn new(config: DeviceConfig) -> Self {
        Self {
            inner: Mutex::new(Cell::new(ConfigSnapshot {
                config,
                generation: 0,
            })),
        }
    }

    /// Replace the configuration, returning the new generation
    pub fn publish(&self, config: DeviceConfig) -> u32 {
        self.inner.lock(|cell| {
            let generation = cell.get().generation.wrapping_add(1);
            cell.set(ConfigSnapshot { config, generation });
            generation
        })
    }

    pub fn get(&self) -> DeviceConfig {
        self.snapshot().config
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        self.inner.lock(|cell| cell.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_publish_replaces_whole_value() {
        let live = LiveConfig::<NoopRawMutex>::new(DeviceConfig::DEFAULT);
        assert_eq!(live.snapshot().generation, 0);

        let mut next = DeviceConfig::DEFAULT;
        next.set_universe(7);
        next.set_num_leds(50);
        assert_eq!(live.publish(next), 1);

        let snapshot = live.snapshot();
        assert_eq!(snapshot.config, next);
        assert_eq!(snapshot.generation, 1);
        assert_eq!(live.get().bytes_to_forward(), 150);
    }
}
