//! CrowdLight Hardware Abstraction Layer
//!
//! Traits the firmware consumes without knowing which chip backs them:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  crowdlight-firmware                    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  crowdlight-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │crowdlight-hal-│
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Button inputs, with [`gpio::PressDetector`] turning
//!   polled levels into press edges
//! - [`flash::FlashStorage`] - Persistent key-value storage
//! - [`adc::TemperatureSensor`] - On-die temperature for the status display

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod flash;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use adc::{SensorError, TemperatureSensor};
pub use flash::{FlashError, FlashStorage, StorageKey};
pub use gpio::{InputPin, PressDetector};
