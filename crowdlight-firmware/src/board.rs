//! Board constants
//!
//! Generated at build time from `device.toml`; see `build.rs` for the
//! accepted ranges.

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
