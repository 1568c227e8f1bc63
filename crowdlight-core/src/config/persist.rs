//! Persisted configuration record
//!
//! The record is postcard-encoded `{ version, config }`. Loading rejects
//! unknown versions and out-of-range fields, so a corrupt or stale record
//! never reaches the live configuration.

use serde::{Deserialize, Serialize};

use super::device::{ConfigError, DeviceConfig};

/// Current record layout version
pub const CONFIG_RECORD_VERSION: u8 = 1;

/// Upper bound of an encoded record
pub const MAX_RECORD_SIZE: usize = 32;

/// Errors encoding or decoding the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Serialization failed (buffer too small)
    Serialize,
    /// Stored bytes are not a valid record
    Deserialize,
    /// Record was written by a different firmware layout
    VersionMismatch { found: u8 },
    /// Record decoded but holds out-of-range values
    Invalid(ConfigError),
}

impl From<ConfigError> for PersistError {
    fn from(e: ConfigError) -> Self {
        PersistError::Invalid(e)
    }
}

#[derive(Serialize, Deserialize)]
struct StoredConfig {
    version: u8,
    config: DeviceConfig,
}

/// Encode `config` into `buffer`, returning the bytes written
pub fn encode_record(config: &DeviceConfig, buffer: &mut [u8]) -> Result<usize, PersistError> {
    let record = StoredConfig {
        version: CONFIG_RECORD_VERSION,
        config: *config,
    };
    let used = postcard::to_slice(&record, buffer).map_err(|_| PersistError::Serialize)?;
    Ok(used.len())
}

/// Decode and validate a stored record
pub fn decode_record(bytes: &[u8]) -> Result<DeviceConfig, PersistError> {
    let record: StoredConfig =
        postcard::from_bytes(bytes).map_err(|_| PersistError::Deserialize)?;

    if record.version != CONFIG_RECORD_VERSION {
        return Err(PersistError::VersionMismatch {
            found: record.version,
        });
    }

    record.config.validate()?;
    Ok(record.config)
}
