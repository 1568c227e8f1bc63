//! RP2040-specific HAL for the CrowdLight transmitter
//!
//! Implements the shared `crowdlight-hal` traits on RP2040 peripherals:
//!
//! - Flash storage driver (implements `crowdlight_hal::FlashStorage`)
//! - Button inputs (implements `crowdlight_hal::InputPin`)
//! - On-die temperature sensor (implements `crowdlight_hal::TemperatureSensor`)

#![no_std]

pub mod adc;
pub mod flash;
pub mod gpio;

// Re-export shared traits from crowdlight-hal for convenience
pub use crowdlight_hal::{FlashStorage as FlashStorageTrait, StorageKey};
