//! Configuration persistence
//!
//! Loads the device configuration record from flash and writes it back
//! after a menu commit. Falls back to compiled-in defaults when flash is
//! empty or the record is unusable.

use defmt::*;

use crowdlight_core::config::{decode_record, encode_record, DeviceConfig, PersistError, MAX_RECORD_SIZE};
use crowdlight_hal::{FlashError, FlashStorage, StorageKey};

/// Configuration persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Flash operation failed
    Flash(FlashError),
    /// Record could not be encoded or decoded
    Record(PersistError),
}

impl From<FlashError> for LoadError {
    fn from(e: FlashError) -> Self {
        LoadError::Flash(e)
    }
}

impl From<PersistError> for LoadError {
    fn from(e: PersistError) -> Self {
        LoadError::Record(e)
    }
}

/// Configuration persistence manager
pub struct ConfigPersistence<S: FlashStorage> {
    storage: S,
}

impl<S: FlashStorage> ConfigPersistence<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the stored configuration, or defaults
    ///
    /// On first boot (nothing stored) the defaults are written so later
    /// boots find a record. A corrupt record is left in place until the
    /// next commit overwrites it.
    pub async fn load_or_default(&mut self) -> DeviceConfig {
        match self.load().await {
            Ok(config) => {
                info!(
                    "Loaded config: universe={}, leds={}, dhcp={}",
                    config.universe(), config.num_leds(), config.use_dhcp()
                );
                config
            }
            Err(LoadError::Flash(FlashError::NotFound)) => {
                info!("No stored config, writing defaults");
                let config = DeviceConfig::DEFAULT;
                if let Err(e) = self.save(&config).await {
                    warn!("Failed to store default config: {:?}", e);
                }
                config
            }
            Err(e) => {
                warn!("Stored config unusable ({:?}), using defaults", e);
                DeviceConfig::DEFAULT
            }
        }
    }

    /// Load and validate the stored record
    pub async fn load(&mut self) -> Result<DeviceConfig, LoadError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = self.storage.read(StorageKey::DeviceConfig, &mut buffer).await?;
        debug!("Read {} byte config record", len);
        Ok(decode_record(&buffer[..len])?)
    }

    /// Persist `config`
    pub async fn save(&mut self, config: &DeviceConfig) -> Result<(), LoadError> {
        let mut buffer = [0u8; MAX_RECORD_SIZE];
        let len = encode_record(config, &mut buffer)?;
        self.storage.write(StorageKey::DeviceConfig, &buffer[..len]).await?;
        Ok(())
    }
}
