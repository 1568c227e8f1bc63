//! Board-agnostic core logic for the CrowdLight transmitter
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Device configuration, bounds and its persisted record format
//! - Cross-core shared state (channel snapshot, live configuration)
//! - Menu state machine driven by button events
//! - Producer data path (validate, forward, publish)
//! - Consumer console (slideshow, link status, dashboard)
//! - Retry back-off for hardware bring-up

#![no_std]
#![deny(unsafe_code)]

pub mod bridge;
pub mod config;
pub mod console;
pub mod menu;
pub mod retry;
pub mod shared;
pub mod status;
