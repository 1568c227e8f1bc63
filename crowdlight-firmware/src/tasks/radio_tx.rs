//! Radio transmit task (core0)
//!
//! Probes the HC-12 once, then writes every frame the network task hands
//! over. At 9600 baud a full frame takes tens of milliseconds, so frames
//! that arrive meanwhile overwrite each other in `RADIO_OUT` and only the
//! newest is sent.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::uart::BufferedUart;

use crate::channels::RADIO_OUT;
use crate::radio::Hc12;

/// HC-12 transmit loop
#[embassy_executor::task]
pub async fn radio_tx_task(uart: BufferedUart, set_pin: Output<'static>) {
    let mut radio = Hc12::new(uart, set_pin);

    match radio.init().await {
        Ok(()) => info!("HC-12 ready"),
        Err(e) => warn!("HC-12 probe failed ({:?}), transmitting anyway", e),
    }

    let mut sent: u32 = 0;
    loop {
        let frame = RADIO_OUT.wait().await;
        match radio.send(&frame).await {
            Ok(()) => {
                sent = sent.wrapping_add(1);
                trace!("Radio frame {} sent ({} bytes)", sent, frame.wire_len());
            }
            Err(e) => warn!("Radio write failed: {:?}", e),
        }
    }
}
