//! OLED status display
//!
//! The renderer and screen model live in `crowdlight-display`; this module
//! only carries the panel driver.

pub mod ssd1306;

pub use ssd1306::Ssd1306;
