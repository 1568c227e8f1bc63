//! CrowdLight wire formats
//!
//! This crate defines the two byte-exact formats the transmitter speaks:
//!
//! - **E1.31 ingress** ([`e131`]): validation of sACN data packets arriving
//!   over UDP and extraction of the DMX channel payload.
//! - **Radio egress** ([`frame`]): the framed, checksummed format written to
//!   the HC-12 serial link.
//!
//! Radio frame format:
//! ```text
//! ┌────────┬────────┬─────────────┬──────────┐
//! │ MARKER │ LENGTH │ PAYLOAD     │ CHECKSUM │
//! │ 1B     │ 1B     │ 0–255B      │ 1B       │
//! └────────┴────────┴─────────────┴──────────┘
//! ```
//!
//! Both modules are pure: bytes in, typed values or a rejection reason out.

#![no_std]
#![deny(unsafe_code)]

pub mod e131;
pub mod frame;

pub use e131::{parse, Rejection, ValidatedFrame, DMX_MAX_CHANNELS, E131_PORT};
pub use frame::{
    decode, FrameError, FrameParser, RadioFrame, FRAME_MARKER, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE,
};
