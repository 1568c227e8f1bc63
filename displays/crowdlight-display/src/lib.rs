//! Display support for the CrowdLight transmitter
//!
//! This crate provides:
//! - `Screen`, an 8 x 21 character buffer matching a 128x64 OLED
//! - `DisplayBackend` trait implemented by the panel driver
//! - `FrameBuffer`, the page-organized pixel buffer those panels share
//! - `Renderer`, which turns a [`crowdlight_core::console::Dashboard`] into a
//!   `Screen`
//!
//! The core never knows pixel layout; the firmware renders into a `Screen`
//! and pushes it to whichever backend the board carries.

#![no_std]

pub mod backend;
pub mod framebuffer;
pub mod renderer;
pub mod screen;

pub use backend::{draw, DisplayBackend, DisplayError};
pub use framebuffer::FrameBuffer;
pub use renderer::{Renderer, HEADER_TITLE};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
