//! HC-12 433 MHz serial radio
//!
//! The module is a transparent UART bridge. Pulling SET low enters AT
//! command mode; releasing it returns to transparent mode.

use defmt::*;
use embassy_time::{with_timeout, Duration, Timer};
use embedded_hal::digital::OutputPin;
use embedded_io_async::{Read, Write};

use crowdlight_protocol::{RadioFrame, MAX_FRAME_SIZE};

use crate::board;

/// Radio errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// UART read or write failed
    Io,
    /// SET pin could not be driven
    Pin,
    /// Module did not answer the AT probe in time
    NoResponse,
}

/// HC-12 on a UART with its SET line
pub struct Hc12<U, P> {
    uart: U,
    set: P,
}

impl<U, P> Hc12<U, P>
where
    U: Read + Write,
    P: OutputPin,
{
    pub fn new(uart: U, set: P) -> Self {
        Self { uart, set }
    }

    /// Probe the module in AT mode, then return it to transparent mode
    ///
    /// The module is always left in transparent mode, even when the probe
    /// fails, so transmission can go ahead regardless.
    pub async fn init(&mut self) -> Result<(), RadioError> {
        self.set.set_low().map_err(|_| RadioError::Pin)?;
        Timer::after(Duration::from_millis(board::RADIO_PROBE_SETTLE_MS)).await;

        let probe = self.probe().await;

        self.set.set_high().map_err(|_| RadioError::Pin)?;
        Timer::after(Duration::from_millis(board::RADIO_RESUME_SETTLE_MS)).await;

        probe
    }

    async fn probe(&mut self) -> Result<(), RadioError> {
        self.uart.write_all(b"AT").await.map_err(|_| RadioError::Io)?;
        self.uart.flush().await.map_err(|_| RadioError::Io)?;

        let timeout = Duration::from_millis(board::RADIO_PROBE_TIMEOUT_MS);
        let mut reply = [0u8; 16];
        let mut len = 0;

        let answered = with_timeout(timeout, async {
            while len < reply.len() {
                match self.uart.read(&mut reply[len..]).await {
                    Ok(0) | Err(_) => return false,
                    Ok(n) => len += n,
                }
                if reply[..len].windows(2).any(|w| w == b"OK") {
                    return true;
                }
            }
            false
        })
        .await;

        match answered {
            Ok(true) => {
                debug!("HC-12 answered AT probe");
                Ok(())
            }
            _ => Err(RadioError::NoResponse),
        }
    }

    /// Write one frame to the air
    pub async fn send(&mut self, frame: &RadioFrame) -> Result<(), RadioError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = frame.write_to(&mut buffer).map_err(|_| RadioError::Io)?;
        self.uart.write_all(&buffer[..len]).await.map_err(|_| RadioError::Io)
    }
}
